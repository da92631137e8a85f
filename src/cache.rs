//! Capacity-bounded least-recently-used caches.
//!
//! [`LruCache`] is the plain bookkeeping structure. [`MemoCache`] wraps one
//! for async use: the entry map is locked only to read or insert, and a miss
//! is loaded under a per-key gate so concurrent callers for the same key wait
//! for a single load while hits on other keys go straight through.

use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;

/// Hit/miss counters for one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Entries currently held.
    pub entries: usize,
}

/// Keeps at most `capacity` entries, evicting the least recently used one.
///
/// A capacity of zero disables caching entirely.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    // Front is least recently used.
    order: VecDeque<K>,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached value and marks it as most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.entries.contains_key(key) {
            self.stats.misses += 1;
            return None;
        }
        self.stats.hits += 1;
        self.touch(key);
        self.entries.get(key)
    }

    /// Looks a value up without touching recency or counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }
        self.order.push_back(key);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            ..self.stats
        }
    }

    fn touch<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(position) = self.order.iter().position(|k| <K as Borrow<Q>>::borrow(k) == key) {
            if let Some(k) = self.order.remove(position) {
                self.order.push_back(k);
            }
        }
    }
}

/// String-keyed async LRU with single-flight loading per key.
#[derive(Debug)]
pub struct MemoCache<V> {
    entries: Mutex<LruCache<String, V>>,
    gates: std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<V: Clone> MemoCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            gates: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, loading it on a miss.
    ///
    /// Only one load per key runs at a time; callers arriving meanwhile wait
    /// and then take the stored value. Failed loads are not stored, so the
    /// next caller loads again.
    pub async fn get_or_try_load<E, F, Fut>(&self, key: &str, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.entries.lock().await.get(key) {
            return Ok(hit.clone());
        }

        let gate = self.gate(key);
        let loaded = {
            let _loading = gate.lock().await;
            let stored = self.entries.lock().await.peek(key).cloned();
            match stored {
                Some(hit) => Ok(hit),
                None => {
                    let loaded = load().await;
                    if let Ok(value) = &loaded {
                        self.entries.lock().await.insert(key.to_string(), value.clone());
                    }
                    loaded
                }
            }
        };
        self.release_gate(key, &gate);
        loaded
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        self.entries.lock().await.stats()
    }

    fn gate(&self, key: &str) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(gates.entry(key.to_string()).or_default())
    }

    fn release_gate(&self, key: &str, gate: &Arc<Mutex<()>>) {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        if gates.get(key).is_some_and(|current| Arc::ptr_eq(current, gate)) {
            gates.remove(key);
        }
    }
}

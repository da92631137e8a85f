//! Memoized access to PokeAPI.
//!
//! `DexClient` is built once at startup and handed by reference to every tool.
//! It owns the fetcher plus one [`MemoCache`] per lookup kind. No cache lock
//! is held across a network call: a miss loads under a per-key gate, so two
//! concurrent calls for the same key fetch once while hits on other keys are
//! served immediately. A dedicated cache's gate is taken before the response
//! cache's gate, never the other way round.

use crate::cache::{CacheStats, MemoCache};
use crate::config::{CacheConfig, DexConfig};
use crate::errors::{DexError, DexResult, FetchResult};
use crate::fetch::{HttpFetcher, JsonFetcher};
use crate::pokeapi::{MoveDetails, TypeListing, TypeResource};
use schema::{is_battle_type, TypeRelations};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub struct DexClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    responses: MemoCache<Arc<Value>>,
    type_listing: MemoCache<Arc<Vec<String>>>,
    type_relations: MemoCache<Arc<TypeRelations>>,
    move_data: MemoCache<Arc<MoveDetails>>,
}

impl std::fmt::Debug for DexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DexClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DexClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>, base_url: impl Into<String>, caches: &CacheConfig) -> Self {
        let base_url: String = base_url.into();
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            responses: MemoCache::new(caches.fetch),
            type_listing: MemoCache::new(caches.type_listing),
            type_relations: MemoCache::new(caches.type_relations),
            move_data: MemoCache::new(caches.move_data),
        }
    }

    /// Builds a client that talks to the configured PokeAPI over HTTP.
    pub fn from_config(config: &DexConfig) -> FetchResult<Self> {
        let fetcher = HttpFetcher::new(config.timeout())?;
        Ok(Self::new(Arc::new(fetcher), config.base_url.clone(), &config.cache))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path below the API root, e.g. `type/fire`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetches a JSON document, serving repeats from the response cache.
    ///
    /// Failures carry `context` and are never cached.
    pub async fn fetch_json(&self, url: &str, context: &str) -> DexResult<Arc<Value>> {
        self.responses
            .get_or_try_load(url, || async {
                debug!(url, "response cache miss");
                self.fetcher
                    .get_json(url)
                    .await
                    .map(Arc::new)
                    .map_err(|source| DexError::Upstream {
                        context: context.to_string(),
                        source,
                    })
            })
            .await
    }

    /// Fetches a document and deserializes it into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(&self, url: &str, context: &str) -> DexResult<T> {
        let value = self.fetch_json(url, context).await?;
        T::deserialize(&*value).map_err(|err| DexError::malformed(context, err))
    }

    /// Canonical battle types, sorted, without `unknown` and `shadow`.
    pub async fn list_all_types(&self) -> DexResult<Arc<Vec<String>>> {
        let url = self.endpoint("type");
        self.type_listing
            .get_or_try_load(&url, || async {
                let raw: TypeListing = self.fetch_as(&url, "type listing").await?;
                let mut types: Vec<String> = raw
                    .results
                    .into_iter()
                    .map(|entry| entry.name)
                    .filter(|name| is_battle_type(name))
                    .collect();
                types.sort();
                Ok::<_, DexError>(Arc::new(types))
            })
            .await
    }

    pub async fn type_relations(&self, type_name: &str) -> DexResult<Arc<TypeRelations>> {
        let key = type_name.to_lowercase();
        self.type_relations
            .get_or_try_load(&key, || async {
                let raw: TypeResource = self
                    .fetch_as(
                        &self.endpoint(&format!("type/{}", key)),
                        &format!("type data for {}", type_name),
                    )
                    .await?;
                Ok::<_, DexError>(Arc::new(TypeRelations::from(raw.damage_relations)))
            })
            .await
    }

    pub async fn move_data(&self, move_name: &str) -> DexResult<Arc<MoveDetails>> {
        let key = move_name.to_lowercase();
        self.move_data
            .get_or_try_load(&key, || async {
                let details: MoveDetails = self
                    .fetch_as(
                        &self.endpoint(&format!("move/{}", key)),
                        &format!("move data for {}", move_name),
                    )
                    .await?;
                Ok::<_, DexError>(Arc::new(details))
            })
            .await
    }

    /// Empties every cache.
    pub async fn clear(&self) {
        self.type_listing.clear().await;
        self.type_relations.clear().await;
        self.move_data.clear().await;
        self.responses.clear().await;
    }

    pub async fn response_stats(&self) -> CacheStats {
        self.responses.stats().await
    }
}

//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional RON file, then
//! command-line flags or environment variables (see [`crate::cli`]).

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Entry limits for each memoized lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Raw responses keyed by URL.
    pub fetch: usize,
    pub type_listing: usize,
    pub type_relations: usize,
    pub move_data: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            fetch: 256,
            type_listing: 1,
            type_relations: 64,
            move_data: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub cache: CacheConfig,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache: CacheConfig::default(),
        }
    }
}

impl DexConfig {
    /// Parses a RON document. Missing fields keep their defaults.
    pub fn from_ron(source: &str, origin: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;
        Self::from_ron(&text, &origin)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

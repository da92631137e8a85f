use thiserror::Error;

/// Main error type surfaced by every DexMCP tool
#[derive(Debug, Error)]
pub enum DexError {
    /// The identifier did not resolve to any creature
    #[error("Could not find Pokemon '{identifier}': {source}")]
    NotFound {
        identifier: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A PokeAPI request failed or returned something unusable
    #[error("Failed to fetch {context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: FetchError,
    },
    /// Caller-supplied arguments violate a precondition
    #[error("{0}")]
    Validation(String),
}

/// Errors raised by the HTTP collaborator before any caching happens
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    /// The body was not JSON, or not the JSON shape we expected
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors related to loading runtime configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl DexError {
    pub fn validation(message: impl Into<String>) -> Self {
        DexError::Validation(message.into())
    }

    /// Wraps a payload that parsed as JSON but not into the expected shape.
    pub fn malformed(context: impl Into<String>, source: serde_json::Error) -> Self {
        DexError::Upstream {
            context: context.into(),
            source: FetchError::Decode(source),
        }
    }
}

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;

/// Type alias for Results using FetchError
pub type FetchResult<T> = Result<T, FetchError>;

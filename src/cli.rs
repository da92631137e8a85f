//! Command-line plumbing shared by both binaries.

use crate::config::DexConfig;
use crate::errors::ConfigError;
use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Options accepted by every binary.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to a RON configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// PokeAPI root URL
    #[arg(long, env = "DEXMCP_BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "DEXMCP_TIMEOUT_SECS", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Defaults, then the config file, then flags and environment.
    pub fn resolve_config(&self) -> Result<DexConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DexConfig::load(path)?,
            None => DexConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        Ok(config)
    }
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v` when set.
/// Output goes to stderr because stdout may carry the MCP transport.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

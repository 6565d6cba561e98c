use std::path::PathBuf;
use std::time::Duration;

use vireo_model::DEFAULT_LATEST_LIMIT;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8096;
pub const DEFAULT_FULL_REFRESH_INTERVAL: Duration =
    Duration::from_secs(3 * 24 * 60 * 60);

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub library: LibraryConfig,
    pub refresh: RefreshConfig,
    pub latest: LatestConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryConfig {
    /// JSON or TOML library snapshot loaded at startup
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Age after which a sparse item is refreshed with a forced save
    pub full_refresh_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            full_refresh_interval: DEFAULT_FULL_REFRESH_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestConfig {
    /// Used when a latest-items request carries no `limit`
    pub default_limit: usize,
}

impl Default for LatestConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LATEST_LIMIT,
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

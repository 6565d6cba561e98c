//! Layered server configuration: defaults, then an optional TOML file, then
//! environment variables.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    Config, ConfigMetadata, LatestConfig, LibraryConfig, RefreshConfig,
    ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf, time::Duration};
use thiserror::Error;

use super::{
    models::{
        Config, ConfigMetadata, LatestConfig, LibraryConfig, RefreshConfig,
        ServerConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![PathBuf::from("vireo.toml"), PathBuf::from("config/vireo.toml")]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, the config file and the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment layer and
    /// no `.env` handling.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        if let Some(bad) = env.malformed.first() {
            return Err(ConfigLoadError::InvalidEnvValue {
                key: bad.key,
                value: bad.value.clone(),
                reason: bad.reason.clone(),
            });
        }

        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            compose_config(file_config, env, config_path, env_file_loaded)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let requested = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match requested {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
    env_file_loaded: bool,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if config_path.is_none() {
        warnings.push_with_hint(
            "No vireo.toml detected; using environment variables and defaults",
            "Create vireo.toml or point VIREO_CONFIG at a configuration file",
        );
    }

    let FileConfig {
        server: file_server,
        library: file_library,
        refresh: file_refresh,
        latest: file_latest,
    } = file_config.unwrap_or_default();

    let defaults = ServerConfig::default();
    let server = ServerConfig {
        host: env.server_host.or(file_server.host).unwrap_or(defaults.host),
        port: env.server_port.or(file_server.port).unwrap_or(defaults.port),
    };

    let library = LibraryConfig {
        snapshot: env.library_snapshot.or(file_library.snapshot),
    };

    let refresh = match env
        .full_refresh_interval
        .map(|raw| ("VIREO_FULL_REFRESH_INTERVAL", raw))
        .or_else(|| {
            file_refresh
                .full_refresh_interval
                .map(|raw| ("refresh.full_refresh_interval", raw))
        }) {
        Some((key, raw)) => RefreshConfig {
            full_refresh_interval: parse_interval(key, &raw)?,
        },
        None => RefreshConfig::default(),
    };

    let latest = LatestConfig {
        default_limit: env
            .latest_default_limit
            .or(file_latest.default_limit)
            .unwrap_or(LatestConfig::default().default_limit),
    };

    let config = Config {
        server,
        library,
        refresh,
        latest,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded,
        },
    };

    warnings.extend(validation::apply_guard_rails(&config)?);
    Ok((config, warnings))
}

fn parse_interval(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            key,
            value: raw.to_string(),
            source,
        }
    })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration '{value}' for {key}")]
    InvalidDuration {
        key: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidEnvValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub library: FileLibraryConfig,
    #[serde(default)]
    pub refresh: FileRefreshConfig,
    #[serde(default)]
    pub latest: FileLatestConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLibraryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileRefreshConfig {
    /// humantime duration, e.g. "3days" or "72h"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_refresh_interval: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLatestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_limit: Option<usize>,
}

/// Values read from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub library_snapshot: Option<PathBuf>,
    pub full_refresh_interval: Option<String>,
    pub latest_default_limit: Option<usize>,
    /// Numeric variables that were set but did not parse
    pub malformed: Vec<MalformedEnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEnvVar {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the env layer from an arbitrary lookup; blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };
        let mut malformed = Vec::new();

        let server_port =
            parse_number(&mut malformed, "VIREO_PORT", var("VIREO_PORT"));
        let latest_default_limit = parse_number(
            &mut malformed,
            "VIREO_LATEST_DEFAULT_LIMIT",
            var("VIREO_LATEST_DEFAULT_LIMIT"),
        );

        Self {
            config_path: var("VIREO_CONFIG").map(PathBuf::from),
            server_host: var("VIREO_HOST"),
            server_port,
            library_snapshot: var("VIREO_LIBRARY_SNAPSHOT").map(PathBuf::from),
            full_refresh_interval: var("VIREO_FULL_REFRESH_INTERVAL"),
            latest_default_limit,
            malformed,
        }
    }
}

fn parse_number<T>(
    malformed: &mut Vec<MalformedEnvVar>,
    key: &'static str,
    raw: Option<String>,
) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            malformed.push(MalformedEnvVar {
                key,
                value: raw,
                reason: err.to_string(),
            });
            None
        }
    }
}

use thiserror::Error;

use super::models::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("latest.default_limit must be greater than zero")]
    ZeroLatestLimit,
    #[error("refresh.full_refresh_interval must be greater than zero")]
    ZeroRefreshInterval,
}

/// Rejects settings the server cannot run with and warns about odd ones.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.latest.default_limit == 0 {
        return Err(ConfigGuardRailError::ZeroLatestLimit);
    }
    if config.refresh.full_refresh_interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroRefreshInterval);
    }

    if config.library.snapshot.is_none() {
        warnings.push_with_hint(
            "No library snapshot configured; serving an empty library",
            "Set VIREO_LIBRARY_SNAPSHOT or library.snapshot in vireo.toml",
        );
    }
    if config.server.port == 0 {
        warnings.push("server.port is 0; the OS will pick a free port");
    }

    Ok(warnings)
}

//! Telegram transport settings.

use config::{Config, ConfigError};
use inclusive_brief_core::config::{build_config, BriefSettings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default bind address of the health endpoint.
pub const DEFAULT_HEALTH_BIND: &str = "0.0.0.0";

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramSettings {
    /// Telegram Bot API token (`TOKEN`).
    pub token: String,
    /// Port of the health endpoint (`HEALTH_PORT`); disabled when unset.
    pub health_port: Option<u16>,
    /// Bind address of the health endpoint (`HEALTH_BIND`).
    #[serde(default = "default_health_bind")]
    pub health_bind: String,
}

fn default_health_bind() -> String {
    DEFAULT_HEALTH_BIND.to_string()
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or `TOKEN` is missing or blank.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize and validate settings from an already built `Config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `TOKEN` is missing or blank.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        if settings.token.trim().is_empty() {
            return Err(ConfigError::Message("TOKEN is empty".to_string()));
        }
        Ok(settings)
    }
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// AI client and downloader settings.
    pub core: Arc<BriefSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(core: BriefSettings, telegram: TelegramSettings) -> Self {
        Self {
            core: Arc::new(core),
            telegram: Arc::new(telegram),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder
                .set_override(*key, *value)
                .unwrap_or_else(|e| panic!("override {key}: {e}"));
        }
        builder
            .build()
            .unwrap_or_else(|e| panic!("build config: {e}"))
    }

    #[test]
    fn test_health_disabled_by_default() -> Result<(), ConfigError> {
        let settings = TelegramSettings::from_config(config_with(&[("token", "123:abc")]))?;
        assert_eq!(settings.token, "123:abc");
        assert_eq!(settings.health_port, None);
        assert_eq!(settings.health_bind, DEFAULT_HEALTH_BIND);
        Ok(())
    }

    #[test]
    fn test_health_port_parsed() -> Result<(), ConfigError> {
        let settings = TelegramSettings::from_config(config_with(&[
            ("token", "123:abc"),
            ("health_port", "8000"),
            ("health_bind", "127.0.0.1"),
        ]))?;
        assert_eq!(settings.health_port, Some(8000));
        assert_eq!(settings.health_bind, "127.0.0.1");
        Ok(())
    }

    #[test]
    fn test_missing_token_is_error() {
        let result = TelegramSettings::from_config(config_with(&[("api_key", "k")]));
        let err = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("token"), "unexpected error: {err}");
    }

    #[test]
    fn test_blank_token_is_error() {
        let result = TelegramSettings::from_config(config_with(&[("token", " ")]));
        assert!(result.is_err());
    }
}

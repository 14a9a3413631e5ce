//! Configuration and settings management
//!
//! Loads settings from configuration files and environment variables and
//! defines the defaults for model identifiers and timeouts.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default text-generation model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-pro-latest";
/// Default vision-capable model.
pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-flash";
/// Default Gemini REST API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default timeout for a single model call, in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
/// Default timeout for an image download, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Settings shared by the AI client and the image fetcher.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BriefSettings {
    /// Generative-AI API key (`API_KEY`).
    pub api_key: String,

    /// Text model identifier (`TEXT_MODEL`).
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Vision model identifier (`VISION_MODEL`).
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    /// Gemini REST API base URL (`GEMINI_API_BASE`).
    #[serde(default = "default_gemini_api_base")]
    pub gemini_api_base: String,

    /// Timeout for each model call in seconds (`LLM_TIMEOUT_SECS`).
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,
    /// Timeout for image downloads in seconds (`FETCH_TIMEOUT_SECS`).
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_vision_model() -> String {
    DEFAULT_VISION_MODEL.to_string()
}

fn default_gemini_api_base() -> String {
    DEFAULT_GEMINI_API_BASE.to_string()
}

const fn default_llm_timeout_secs() -> u64 {
    DEFAULT_LLM_TIMEOUT_SECS
}

const fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

/// Build the layered configuration source used by every settings struct.
///
/// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
/// `config/local`, `APP__*` variables, then plain environment variables
/// (`API_KEY` maps to `api_key`). Empty variables are treated as unset.
///
/// # Errors
///
/// Returns a `ConfigError` if a present source cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

impl BriefSettings {
    /// Load settings from configuration files and the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use inclusive_brief_core::config::BriefSettings;
    ///
    /// let settings = BriefSettings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `API_KEY` is missing or blank, or any
    /// value has the wrong type.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize and validate settings from an already built `Config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required key is missing or blank.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Message("API_KEY is empty".to_string()));
        }
        if self.text_model.trim().is_empty() || self.vision_model.trim().is_empty() {
            return Err(ConfigError::Message(
                "TEXT_MODEL and VISION_MODEL must not be empty".to_string(),
            ));
        }
        if self.llm_timeout_secs == 0 || self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Timeout applied to each model call.
    #[must_use]
    pub const fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Timeout applied to each image download.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Settings with the given API key and defaults for everything else.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            text_model: default_text_model(),
            vision_model: default_vision_model(),
            gemini_api_base: default_gemini_api_base(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

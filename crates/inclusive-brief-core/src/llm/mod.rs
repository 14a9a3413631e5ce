//! LLM providers and client
//!
//! Exposes the two operations the bot needs, text generation and vision,
//! behind a provider trait so the backend can be swapped or mocked.

mod http_utils;
/// Implementations of specific LLM providers
pub mod providers;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::config::BriefSettings;
use crate::media::DecodedImage;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    /// Error returned by the provider's API (including auth failures)
    #[error("API error: {0}")]
    ApiError(String),
    /// Rate limit or quota exceeded (429)
    #[error("Rate limit exceeded: {message} (wait: {wait_secs:?}s)")]
    RateLimit {
        /// Retry-After duration in seconds, if provided by the server
        wait_secs: Option<u64>,
        /// Error message from the server
        message: String,
    },
    /// Error during network communication
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Error during JSON serialization or deserialization
    #[error("JSON error: {0}")]
    JsonError(String),
    /// The model answered without any text (e.g. blocked by safety filters)
    #[error("Empty response: {0}")]
    EmptyResponse(String),
    /// The call did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

/// Interface for all LLM providers
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a plain text prompt
    async fn generate_text(&self, prompt: &str, model_id: &str) -> Result<String, LlmError>;

    /// Describe an image
    async fn generate_vision(
        &self,
        image: &DecodedImage,
        model_id: &str,
    ) -> Result<String, LlmError>;
}

/// Client for the text and vision models configured at startup
pub struct LlmClient {
    provider: Arc<dyn LlmProvider>,
    text_model: String,
    vision_model: String,
    timeout: Duration,
}

impl LlmClient {
    /// Create a client backed by the Gemini API
    #[must_use]
    pub fn new(settings: &BriefSettings) -> Self {
        let provider = providers::GeminiProvider::new(
            settings.api_key.clone(),
            settings.gemini_api_base.clone(),
            settings.llm_timeout(),
        );
        Self::with_provider(Arc::new(provider), settings)
    }

    /// Create a client backed by an arbitrary provider
    #[must_use]
    pub fn with_provider(provider: Arc<dyn LlmProvider>, settings: &BriefSettings) -> Self {
        Self {
            provider,
            text_model: settings.text_model.clone(),
            vision_model: settings.vision_model.clone(),
            timeout: settings.llm_timeout(),
        }
    }

    /// Text model identifier in use
    #[must_use]
    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    /// Vision model identifier in use
    #[must_use]
    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    /// Submit a text prompt to the text model
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Timeout` if the call exceeds the configured
    /// timeout, or any error from the provider.
    #[instrument(skip(self, prompt), fields(model = %self.text_model))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        trace!(prompt = prompt, "Full LLM Request");
        self.timed(
            &self.text_model,
            self.provider.generate_text(prompt, &self.text_model),
        )
        .await
    }

    /// Submit an image to the vision model
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Timeout` if the call exceeds the configured
    /// timeout, or any error from the provider.
    #[instrument(skip(self, image), fields(model = %self.vision_model, mime_type = image.mime_type, bytes = image.bytes.len()))]
    pub async fn generate_vision(&self, image: &DecodedImage) -> Result<String, LlmError> {
        self.timed(
            &self.vision_model,
            self.provider.generate_vision(image, &self.vision_model),
        )
        .await
    }

    async fn timed<F>(&self, model: &str, call: F) -> Result<String, LlmError>
    where
        F: Future<Output = Result<String, LlmError>>,
    {
        debug!(model = model, "Sending request to LLM");

        let start = Instant::now();
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(LlmError::EmptyResponse(
                "model returned blank text".to_string(),
            )),
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        };
        let duration = start.elapsed();

        match &result {
            Ok(resp) => {
                debug!(
                    model = model,
                    duration_ms = duration.as_millis(),
                    "Received success response from LLM"
                );
                trace!(response = %resp, "Full LLM Response");
            }
            Err(e) => {
                warn!(
                    model = model,
                    duration_ms = duration.as_millis(),
                    error = %e,
                    "Received error response from LLM"
                );
            }
        }

        result
    }
}

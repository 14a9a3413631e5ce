//! Testing helpers and mock utilities.
//!
//! Provides convenient constructors for mocked LLM providers and image
//! sources. Enabled for unit tests and, for downstream crates, through the
//! `testing` feature.

use crate::config::BriefSettings;
use crate::llm::{LlmError, MockLlmProvider};
use crate::media::{FetchError, MockImageSource};

/// Minimal PNG signature followed by padding, accepted by `DecodedImage::decode`.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];

/// Settings with a dummy key, short timeouts and recognisable model ids.
///
/// The text model is `text-model` and the vision model is `vision-model`.
#[must_use]
pub fn test_settings() -> BriefSettings {
    BriefSettings {
        text_model: "text-model".to_string(),
        vision_model: "vision-model".to_string(),
        llm_timeout_secs: 5,
        fetch_timeout_secs: 5,
        ..BriefSettings::with_api_key("test-key")
    }
}

/// Create a mock LLM provider that answers every text prompt with
/// `response_text`.
///
/// Vision calls fail with `LlmError::ApiError`.
///
/// # Example
///
/// ```rust,ignore
/// use inclusive_brief_core::testing::mock_llm_text;
///
/// let mock = mock_llm_text("Hello, world!");
/// ```
#[must_use]
pub fn mock_llm_text(response_text: &'static str) -> MockLlmProvider {
    let mut mock = MockLlmProvider::new();
    mock.expect_generate_text()
        .returning(move |_, _| Ok(response_text.to_string()));
    mock.expect_generate_vision()
        .returning(|_, _| Err(LlmError::ApiError("Not implemented".to_string())));
    mock
}

/// Create a mock LLM provider whose vision model answers `description` and
/// whose text model answers `reformatted`.
#[must_use]
pub fn mock_llm_vision(description: &'static str, reformatted: &'static str) -> MockLlmProvider {
    let mut mock = MockLlmProvider::new();
    mock.expect_generate_vision()
        .returning(move |_, _| Ok(description.to_string()));
    mock.expect_generate_text()
        .returning(move |_, _| Ok(reformatted.to_string()));
    mock
}

/// Create a mock image source that returns `bytes` for any URL.
#[must_use]
pub fn mock_image_source(bytes: &'static [u8]) -> MockImageSource {
    let mut mock = MockImageSource::new();
    mock.expect_fetch().returning(move |_| Ok(bytes.to_vec()));
    mock
}

/// Create a mock image source that answers every URL with HTTP `status`.
#[must_use]
pub fn mock_image_source_status(status: u16) -> MockImageSource {
    let mut mock = MockImageSource::new();
    mock.expect_fetch()
        .returning(move |_| Err(FetchError::Status(status)));
    mock
}

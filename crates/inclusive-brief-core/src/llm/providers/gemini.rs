use crate::llm::http_utils::{create_http_client, extract_json_value, send_json_request};
use crate::llm::{LlmError, LlmProvider};
use crate::media::DecodedImage;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use std::time::Duration;

const PARTS_PATH: &[&str] = &["candidates", "0", "content", "parts"];

/// LLM provider implementation for Google Gemini
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_base: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    #[must_use]
    pub fn new(api_key: String, api_base: String, timeout: Duration) -> Self {
        Self {
            http_client: create_http_client(timeout),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model_id: &str) -> String {
        format!("{}/models/{model_id}:generateContent", self.api_base)
    }

    async fn generate(&self, model_id: &str, body: &Value) -> Result<String, LlmError> {
        let res_json = send_json_request(
            &self.http_client,
            &self.endpoint(model_id),
            body,
            &[("x-goog-api-key", self.api_key.as_str())],
        )
        .await?;

        candidate_text(&res_json).map_err(|e| match block_reason(&res_json) {
            Some(reason) => LlmError::EmptyResponse(format!("prompt blocked: {reason}")),
            None => e,
        })
    }
}

/// Joins the text of every part of the first candidate.
fn candidate_text(response: &Value) -> Result<String, LlmError> {
    let parts = extract_json_value(response, PARTS_PATH)?
        .as_array()
        .ok_or_else(|| LlmError::EmptyResponse("`parts` is not an array".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(LlmError::EmptyResponse("no text parts in response".to_string()));
    }
    Ok(text)
}

fn block_reason(response: &Value) -> Option<&str> {
    response
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(Value::as_str)
}

/// Request body for a text-only prompt.
fn text_request(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Request body carrying a single inline image and no text.
fn vision_request(image: &DecodedImage) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": BASE64.encode(&image.bytes)
                }
            }]
        }]
    })
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate_text(&self, prompt: &str, model_id: &str) -> Result<String, LlmError> {
        self.generate(model_id, &text_request(prompt)).await
    }

    async fn generate_vision(
        &self,
        image: &DecodedImage,
        model_id: &str,
    ) -> Result<String, LlmError> {
        self.generate(model_id, &vision_request(image)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new(
            "key".to_string(),
            "https://example.test/v1beta/".to_string(),
            Duration::from_secs(5),
        );
        assert_eq!(
            provider.endpoint("gemini-1.5-flash"),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_vision_request_inlines_base64() {
        let image = DecodedImage {
            bytes: b"RIFF".to_vec(),
            mime_type: "image/webp",
        };
        let body = vision_request(&image);
        let data = &body["contents"][0]["parts"][0]["inline_data"];
        assert_eq!(data["mime_type"], "image/webp");
        assert_eq!(data["data"], "UklGRg==");
    }

    #[test]
    fn test_text_request_shape() {
        let body = text_request("hi");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["contents"][0]["role"], "user");
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let response = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "**Image:**\n" },
                { "inline_data": { "mime_type": "image/png", "data": "" } },
                { "text": "* A cat." }
            ] } }]
        });
        assert_eq!(
            candidate_text(&response).ok().as_deref(),
            Some("**Image:**\n* A cat.")
        );
    }

    #[test]
    fn test_candidate_without_text_is_empty_response() {
        let response = json!({ "candidates": [{ "content": { "parts": [] } }] });
        assert!(matches!(
            candidate_text(&response),
            Err(LlmError::EmptyResponse(_))
        ));
    }

    #[test]
    fn test_block_reason_detected() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(block_reason(&response), Some("SAFETY"));
        assert_eq!(block_reason(&json!({})), None);
    }
}

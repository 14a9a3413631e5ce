//! HTTP utilities for LLM providers
//!
//! Request/response handling shared by the REST-based providers.

use crate::llm::LlmError;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Longest error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Creates an HTTP client with the given request timeout.
#[must_use]
pub fn create_http_client(timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// Sends an HTTP POST request with JSON body and returns parsed JSON response.
///
/// # Errors
///
/// Returns `LlmError::NetworkError` on connectivity issues, `LlmError::RateLimit`
/// on 429, `LlmError::ApiError` on other non-success status codes, or
/// `LlmError::JsonError` if parsing fails.
pub async fn send_json_request(
    client: &HttpClient,
    url: &str,
    body: &Value,
    extra_headers: &[(&str, &str)],
) -> Result<Value, LlmError> {
    let mut request = client.post(url).json(body);

    for (key, value) in extra_headers {
        request = request.header(*key, *value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| LlmError::NetworkError(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let wait_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let error_text = response.text().await.unwrap_or_default();
        let message = clean_error_body(status, &error_text);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit { wait_secs, message });
        }
        return Err(LlmError::ApiError(message));
    }

    response
        .json()
        .await
        .map_err(|e| LlmError::JsonError(e.without_url().to_string()))
}

fn clean_error_body(status: StatusCode, error_text: &str) -> String {
    // Proxies answer with HTML error pages
    let trimmed = error_text.trim_start();
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if is_html {
        return format!("{status} (Server returned HTML error page)");
    }

    if error_text.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated = crate::utils::truncate_str(error_text, MAX_ERROR_BODY_CHARS);
        format!("{status} - {truncated}... (truncated)")
    } else {
        format!("{status} - {error_text}")
    }
}

/// Navigates a JSON response along a path.
///
/// Path segments are object keys or array indices:
/// `["candidates", "0", "content", "parts"]`.
///
/// # Errors
///
/// Returns `LlmError::EmptyResponse` if a segment is missing.
pub fn extract_json_value<'a>(response: &'a Value, path: &[&str]) -> Result<&'a Value, LlmError> {
    let mut current = response;

    for segment in path {
        let next = match segment.parse::<usize>() {
            Ok(index) => current.get(index),
            Err(_) => current.get(*segment),
        };
        current = next.ok_or_else(|| {
            LlmError::EmptyResponse(format!("missing `{segment}` in response"))
        })?;
    }

    Ok(current)
}

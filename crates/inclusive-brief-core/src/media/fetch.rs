use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while downloading an attachment
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with something other than 200 OK
    #[error("server responded with HTTP {0}")]
    Status(u16),
    /// Connection, TLS or body read failure
    #[error("network error: {0}")]
    Network(String),
    /// The download did not finish within the configured timeout
    #[error("download timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of raw attachment bytes
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Download the resource at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain HTTP GET fetcher
pub struct HttpImageFetcher {
    http_client: HttpClient,
    timeout: Duration,
}

impl HttpImageFetcher {
    /// Create a fetcher whose requests are bounded by `timeout`
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            http_client: HttpClient::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            timeout,
        }
    }

    fn map_error(&self, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            // The URL may embed a bot token
            FetchError::Network(redact_url(error))
        }
    }
}

fn redact_url(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    if let Some(url) = error.url() {
        message = message.replace(url.as_str(), "[URL]");
    }
    message
}

#[async_trait]
impl ImageSource for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let start = Instant::now();
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Image download failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| self.map_error(&e))?;
        debug!(
            bytes = bytes.len(),
            duration_ms = start.elapsed().as_millis(),
            "Image downloaded"
        );
        Ok(bytes.to_vec())
    }
}

//! Plain HTTP liveness endpoint for hosting platforms that check a port.

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::TelegramSettings;

/// Body returned by `GET /`.
pub const HEALTH_BODY: &str = "Server Running 200 OK";

/// Router answering `GET /` with [`HEALTH_BODY`].
pub fn router() -> Router {
    Router::new().route("/", get(|| async { HEALTH_BODY }))
}

/// Serve the health router on `bind:port` until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind: &str, port: u16) -> Result<()> {
    let listener = TcpListener::bind((bind, port)).await?;
    info!(addr = %listener.local_addr()?, "Health endpoint listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Start the health endpoint in the background when `HEALTH_PORT` is set.
pub fn spawn(settings: &TelegramSettings) -> Option<JoinHandle<()>> {
    let port = settings.health_port?;
    let bind = settings.health_bind.clone();
    Some(tokio::spawn(async move {
        if let Err(e) = serve(&bind, port).await {
            error!(error = %e, "Health endpoint stopped");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_reports_running() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(&body[..], HEALTH_BODY.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router is infallible");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_spawn_skipped_without_port() {
        let settings = TelegramSettings {
            token: "1:x".to_string(),
            health_port: None,
            health_bind: "127.0.0.1".to_string(),
        };
        assert!(spawn(&settings).is_none());
    }
}

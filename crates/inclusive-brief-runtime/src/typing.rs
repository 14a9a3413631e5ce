use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::transport::ChatTransport;

/// How often the typing indicator is refreshed while work is pending.
///
/// Telegram clears the indicator after about five seconds.
pub const TYPING_INTERVAL: Duration = Duration::from_secs(4);

/// Drive `work` to completion while keeping the typing indicator visible.
///
/// The indicator is sent right away and then every [`TYPING_INTERVAL`]
/// until `work` resolves. Indicator failures never affect the result.
pub async fn with_typing<T, F>(transport: &T, work: F) -> F::Output
where
    T: ChatTransport + ?Sized,
    F: Future,
{
    tokio::pin!(work);
    let mut ticker = tokio::time::interval(TYPING_INTERVAL);

    loop {
        tokio::select! {
            biased;
            output = &mut work => return output,
            _ = ticker.tick() => {
                if let Err(e) = transport.show_typing().await {
                    debug!(error = %e, "Typing indicator failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockChatTransport;

    #[tokio::test(start_paused = true)]
    async fn test_typing_refreshed_until_work_done() {
        let mut transport = MockChatTransport::new();
        // t=0, 4, 8
        transport.expect_show_typing().times(3).returning(|| Ok(()));

        let result = with_typing(&transport, async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            42
        })
        .await;
        assert_eq!(result, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_failure_is_ignored() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_show_typing()
            .returning(|| Err(anyhow::anyhow!("chat not found")));

        let result = with_typing(&transport, async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            "done"
        })
        .await;
        assert_eq!(result, "done");
    }

    #[tokio::test]
    async fn test_ready_work_skips_indicator() {
        let mut transport = MockChatTransport::new();
        transport.expect_show_typing().never();

        let result = with_typing(&transport, async { 7 }).await;
        assert_eq!(result, 7);
    }
}

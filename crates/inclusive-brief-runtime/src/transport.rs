use anyhow::Result;
use async_trait::async_trait;

use crate::message::Attachment;

/// Outbound side of a chat platform, bound to the chat a message came from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a plain text message to the chat.
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Show the typing indicator once. Platforms expire it on their own.
    async fn show_typing(&self) -> Result<()>;

    /// Resolve a download URL for an attachment of the current message.
    async fn attachment_url(&self, attachment: &Attachment) -> Result<String>;
}

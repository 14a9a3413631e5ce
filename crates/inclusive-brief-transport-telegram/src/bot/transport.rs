use anyhow::Result;
use async_trait::async_trait;
use inclusive_brief_runtime::{Attachment, ChatTransport};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, FileId};

use crate::bot::messaging::send_long_message;

/// Telegram transport bound to the chat a message came from.
pub struct TelegramTransport {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramTransport {
    /// Create a transport replying into `chat_id`.
    pub const fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

/// Download URL of a file on the Bot API file server.
///
/// The URL embeds the bot token and must never be logged unredacted.
#[must_use]
pub fn file_url(api_url: &str, token: &str, file_path: &str) -> String {
    format!(
        "{}/file/bot{token}/{}",
        api_url.trim_end_matches('/'),
        file_path.trim_start_matches('/')
    )
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, text: &str) -> Result<()> {
        send_long_message(&self.bot, self.chat_id, text).await
    }

    async fn show_typing(&self) -> Result<()> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::Typing)
            .await?;
        Ok(())
    }

    async fn attachment_url(&self, attachment: &Attachment) -> Result<String> {
        let file = self.bot.get_file(FileId(attachment.id.clone())).await?;
        Ok(file_url(
            self.bot.api_url().as_str(),
            self.bot.token(),
            &file.path,
        ))
    }
}

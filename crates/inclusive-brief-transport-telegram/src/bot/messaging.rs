//! Common messaging utilities for the Telegram bot.

use anyhow::Result;
use inclusive_brief_core::utils;
use teloxide::prelude::*;
use teloxide::types::ChatId;

/// Maximum message length for Telegram with safety margin, in UTF-16 code units.
/// Telegram's official limit is 4096.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4000;

/// Sends a plain text message, splitting it into several messages if it
/// does not fit in one.
///
/// # Errors
///
/// Returns an error if any part fails to send. Parts already sent stay sent.
pub async fn send_long_message(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    for part in utils::split_long_message(text, TELEGRAM_MESSAGE_LIMIT) {
        bot.send_message(chat_id, part).await?;
    }
    Ok(())
}

use inclusive_brief_core::llm::LlmError;
use inclusive_brief_core::media::{DecodeError, FetchError};
use thiserror::Error;

/// Reply sent when `!vision` arrives without an image.
pub const MISSING_ATTACHMENT_REPLY: &str = "Please attach an image to your !vision message.";

/// Failure of a single command, reported back to the user.
#[derive(Debug, Error)]
pub enum CommandError {
    /// `!vision` without any attachment
    #[error("no attachment on !vision message")]
    MissingAttachment,
    /// The platform could not resolve the attachment URL
    #[error("attachment lookup failed: {0}")]
    Transport(String),
    /// The attachment download failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The downloaded bytes are not an image
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The AI service failed
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl CommandError {
    /// Short text shown to the user in the chat.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingAttachment => MISSING_ATTACHMENT_REPLY.to_string(),
            Self::Transport(reason) => format!("Could not access the attachment: {reason}"),
            Self::Fetch(e) => format!("Could not download the image: {e}"),
            Self::Decode(e) => format!("The attachment is not a supported image: {e}"),
            Self::Llm(e) => format!("The AI service failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            CommandError::MissingAttachment.user_message(),
            MISSING_ATTACHMENT_REPLY
        );
        assert_eq!(
            CommandError::from(FetchError::Status(404)).user_message(),
            "Could not download the image: server responded with HTTP 404"
        );
        assert_eq!(
            CommandError::from(DecodeError::UnknownFormat).user_message(),
            "The attachment is not a supported image: unrecognized image format"
        );
        assert_eq!(
            CommandError::from(DecodeError::UnsupportedFormat("image/gif")).user_message(),
            "The attachment is not a supported image: image/gif images are not supported, use JPEG, PNG, WebP or HEIC"
        );
        assert_eq!(
            CommandError::from(LlmError::Timeout(Duration::from_secs(60))).user_message(),
            "The AI service failed: Request timed out after 60s"
        );
        assert_eq!(
            CommandError::Transport("file is too big".to_string()).user_message(),
            "Could not access the attachment: file is too big"
        );
    }
}

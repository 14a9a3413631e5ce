use inclusive_brief_runtime::{Attachment, AuthorId, InboundMessage};
use teloxide::types::Message;

/// Convert a Telegram message into the platform-neutral model.
///
/// The text is the message text or, for media messages, the caption.
/// Photos contribute their largest size; documents follow photos.
/// Messages without a sender (channel posts) get author `0`.
#[must_use]
pub fn inbound_message(msg: &Message) -> InboundMessage {
    InboundMessage {
        author: AuthorId(msg.from.as_ref().map_or(0, |u| u.id.0)),
        text: msg
            .text()
            .or_else(|| msg.caption())
            .unwrap_or_default()
            .to_string(),
        attachments: attachments(msg),
    }
}

fn attachments(msg: &Message) -> Vec<Attachment> {
    let mut attachments = Vec::new();

    // Sizes are ordered smallest first
    if let Some(photo) = msg.photo().and_then(<[_]>::last) {
        attachments.push(Attachment {
            id: photo.file.id.0.clone(),
            file_name: None,
            mime_type: Some("image/jpeg".to_string()),
        });
    }

    if let Some(document) = msg.document() {
        attachments.push(Attachment {
            id: document.file.id.0.clone(),
            file_name: document.file_name.clone(),
            mime_type: document.mime_type.as_ref().map(ToString::to_string),
        });
    }

    attachments
}

/// Identity of a message author on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuthorId(pub u64);

/// Reference to a file sent along with a message.
///
/// The download URL is not stored here; platforms that issue short-lived
/// URLs resolve it on demand through `ChatTransport::attachment_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Platform file identifier
    pub id: String,
    /// Original file name, when the platform reports one
    pub file_name: Option<String>,
    /// MIME type reported by the platform
    pub mime_type: Option<String>,
}

impl Attachment {
    /// Attachment with only an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: None,
            mime_type: None,
        }
    }
}

/// A message received from the chat platform.
///
/// The originating chat is not part of the message; it is carried by the
/// transport the message is handled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Who sent the message
    pub author: AuthorId,
    /// Message text, or the caption of a media message
    pub text: String,
    /// Attachments in the order the platform delivered them
    pub attachments: Vec<Attachment>,
}

use crate::message::Attachment;

/// Prefix selecting the website analysis command.
pub const ANALYSE_PREFIX: &str = "!analyse";
/// Prefix selecting the image analysis command.
pub const VISION_PREFIX: &str = "!vision";

/// A user request decoded from a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!analyse <subject...>`
    WebsiteAnalysis {
        /// Words after the command, lower-cased and joined by single spaces
        subject: String,
    },
    /// `!vision` with the first attachment of the message, if any
    VisionAnalysis {
        /// The attachment to analyse
        attachment: Option<Attachment>,
    },
    /// Anything else
    Unrecognized,
}

impl Command {
    /// Decode a message body.
    ///
    /// Matching is a case-insensitive prefix match; `!analyse` wins over
    /// `!vision`. Only the first attachment is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use inclusive_brief_runtime::Command;
    ///
    /// let command = Command::parse("!Analyse  Example.com   blog", &[]);
    /// assert_eq!(
    ///     command,
    ///     Command::WebsiteAnalysis { subject: "example.com blog".to_string() }
    /// );
    /// ```
    #[must_use]
    pub fn parse(text: &str, attachments: &[Attachment]) -> Self {
        let lowered = text.to_lowercase();

        if lowered.starts_with(ANALYSE_PREFIX) {
            let subject = lowered
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" ");
            return Self::WebsiteAnalysis { subject };
        }

        if lowered.starts_with(VISION_PREFIX) {
            return Self::VisionAnalysis {
                attachment: attachments.first().cloned(),
            };
        }

        Self::Unrecognized
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WebsiteAnalysis { .. } => "analyse",
            Self::VisionAnalysis { .. } => "vision",
            Self::Unrecognized => "unrecognized",
        }
    }
}

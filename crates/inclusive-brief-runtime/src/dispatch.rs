use std::sync::Arc;
use std::time::Instant;

use inclusive_brief_core::llm::LlmClient;
use inclusive_brief_core::media::ImageSource;
use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::error::CommandError;
use crate::handlers::{analyse_image, analyse_website};
use crate::message::{AuthorId, InboundMessage};
use crate::transport::ChatTransport;
use crate::typing::with_typing;

/// Shared, read-only dependencies of the command handlers.
#[derive(Clone)]
pub struct HandlerContext {
    /// Text and vision model client
    pub llm: Arc<LlmClient>,
    /// Attachment downloader
    pub images: Arc<dyn ImageSource>,
    /// The bot's own identity, used to skip its own messages
    pub bot_id: AuthorId,
}

/// What happened to an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Own message or not a command; nothing was sent
    Ignored,
    /// The command succeeded and its result was sent
    Replied,
    /// The command failed and an error reply was sent
    Failed,
}

/// Handle one inbound message end to end.
///
/// Never returns an error: command failures become a single error reply
/// in the chat, and send failures are logged.
pub async fn handle_message<T>(
    transport: &T,
    message: &InboundMessage,
    ctx: &HandlerContext,
) -> Outcome
where
    T: ChatTransport + ?Sized,
{
    if message.author == ctx.bot_id {
        debug!("Ignoring own message");
        return Outcome::Ignored;
    }

    let command = Command::parse(&message.text, &message.attachments);
    let name = command.name();
    let start = Instant::now();

    let result = match command {
        Command::Unrecognized => return Outcome::Ignored,
        Command::WebsiteAnalysis { subject } => {
            with_typing(transport, analyse_website(&ctx.llm, &subject)).await
        }
        Command::VisionAnalysis { attachment: None } => Err(CommandError::MissingAttachment),
        Command::VisionAnalysis {
            attachment: Some(attachment),
        } => {
            with_typing(
                transport,
                analyse_image(transport, &ctx.llm, ctx.images.as_ref(), &attachment),
            )
            .await
        }
    };

    let duration_ms = start.elapsed().as_millis();
    match result {
        Ok(reply) => {
            info!(command = name, duration_ms, "Command completed");
            deliver(transport, &reply).await;
            Outcome::Replied
        }
        Err(e) => {
            warn!(command = name, duration_ms, error = %e, "Command failed");
            deliver(transport, &e.user_message()).await;
            Outcome::Failed
        }
    }
}

async fn deliver<T>(transport: &T, text: &str)
where
    T: ChatTransport + ?Sized,
{
    if let Err(e) = transport.send_text(text).await {
        error!(error = %e, "Failed to send reply");
    }
}

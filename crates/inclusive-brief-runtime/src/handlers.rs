use inclusive_brief_core::llm::LlmClient;
use inclusive_brief_core::media::{DecodedImage, ImageSource};
use inclusive_brief_core::prompt::{vision_reformat_prompt, website_analysis_prompt};
use tracing::{debug, info};

use crate::error::CommandError;
use crate::message::Attachment;
use crate::transport::ChatTransport;

/// Ask the text model to describe a website or subject.
///
/// # Errors
///
/// Returns `CommandError::Llm` when the model call fails.
pub async fn analyse_website(llm: &LlmClient, subject: &str) -> Result<String, CommandError> {
    info!(subject = subject, "Analysing website");
    let prompt = website_analysis_prompt(subject);
    Ok(llm.generate_text(&prompt).await?)
}

/// Describe an attached image.
///
/// The image goes to the vision model first; its raw description is then
/// restructured by the text model into Image, Details and Additional Notes.
///
/// # Errors
///
/// Returns the first failure among URL resolution, download, decoding and
/// the two model calls. Later steps are not attempted.
pub async fn analyse_image<T>(
    transport: &T,
    llm: &LlmClient,
    images: &dyn ImageSource,
    attachment: &Attachment,
) -> Result<String, CommandError>
where
    T: ChatTransport + ?Sized,
{
    let url = transport
        .attachment_url(attachment)
        .await
        .map_err(|e| CommandError::Transport(e.to_string()))?;

    let bytes = images.fetch(&url).await?;
    let image = DecodedImage::decode(bytes)?;
    debug!(
        attachment = %attachment.id,
        mime_type = image.mime_type,
        bytes = image.bytes.len(),
        "Attachment decoded"
    );

    let description = llm.generate_vision(&image).await?;
    let reformatted = llm
        .generate_text(&vision_reformat_prompt(&description))
        .await?;
    Ok(reformatted)
}

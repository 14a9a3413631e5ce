use crate::bot::inbound::inbound_message;
use crate::bot::TelegramTransport;
use crate::config::BotSettings;
use crate::health;
use inclusive_brief_core::llm::LlmClient;
use inclusive_brief_core::media::HttpImageFetcher;
use inclusive_brief_runtime::{handle_message, AuthorId, HandlerContext};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{debug, error, info};

/// Run the Telegram transport runtime.
///
/// Exits the process if the bot identity cannot be resolved.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let bot = Bot::new(settings.telegram.token.clone());

    let me = match bot.get_me().await {
        Ok(me) => me,
        Err(e) => {
            error!("Failed to connect to Telegram: {}", e);
            std::process::exit(1);
        }
    };
    let name = me
        .user
        .username
        .clone()
        .unwrap_or_else(|| me.user.first_name.clone());
    info!("{} has connected to Telegram!", name);

    if health::spawn(&settings.telegram).is_none() {
        debug!("HEALTH_PORT not set, health endpoint disabled");
    }

    let ctx = Arc::new(init_context(&settings, AuthorId(me.user.id.0)));
    info!(
        text_model = ctx.llm.text_model(),
        vision_model = ctx.llm.vision_model(),
        "LLM Client initialized."
    );

    Dispatcher::builder(bot, setup_handler())
        .dependencies(dptree::deps![ctx])
        // Stickers, joins and other updates are not commands
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_context(settings: &BotSettings, bot_id: AuthorId) -> HandlerContext {
    HandlerContext {
        llm: Arc::new(LlmClient::new(&settings.core)),
        images: Arc::new(HttpImageFetcher::new(settings.core.fetch_timeout())),
        bot_id,
    }
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().or_else(|| msg.caption()).is_some())
        .endpoint(handle_incoming)
}

async fn handle_incoming(
    bot: Bot,
    msg: Message,
    ctx: Arc<HandlerContext>,
) -> Result<(), teloxide::RequestError> {
    let inbound = inbound_message(&msg);
    let transport = TelegramTransport::new(bot, msg.chat.id);
    let outcome = handle_message(&transport, &inbound, &ctx).await;
    debug!(chat_id = msg.chat.id.0, ?outcome, "Message handled");
    respond(())
}

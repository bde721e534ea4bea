use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::{info, warn};

use efb_core::{
    assistant::Assistant, bot::EveBot, config::Config, docs::DocumentationSource,
    messaging::port::MessagingPort,
};

use crate::handlers;
use crate::TelegramMessenger;

pub struct AppState {
    pub bot: EveBot,
}

pub async fn run_polling(
    cfg: Arc<Config>,
    assistant: Assistant,
    docs: Arc<dyn DocumentationSource>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Telegram has no presence/activity; the status line is logged instead.
    match bot.get_me().await {
        Ok(me) => info!("@{} has connected to Telegram!", me.username()),
        Err(e) => warn!(error = %e, "get_me failed"),
    }
    info!(status = %format!("Watching {}", cfg.bot_status), "status");
    info!(
        prefix = %cfg.command_prefix,
        allowed_users = cfg.allowed_users.len(),
        "listening for commands"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        bot: EveBot::new(cfg, assistant, docs, messenger),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

//! Telegram update handlers.
//!
//! Text messages are converted into the core `IncomingMessage` and handed to
//! the dispatcher; everything else is ignored.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::{debug, error};

use efb_core::{
    domain::{ChatId, UserId},
    messaging::types::IncomingMessage,
};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(incoming) = to_incoming(&msg) else {
        debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    // Failures were already answered in the chat; only a failed reply lands here.
    if let Err(e) = state.bot.handle_message(&incoming).await {
        error!(chat_id = incoming.chat_id.0, error = %e, "failed to reply");
    }
    Ok(())
}

fn to_incoming(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let user = msg.from();
    Some(IncomingMessage {
        chat_id: ChatId(msg.chat.id.0),
        user_id: user.map(|u| UserId(u.id.0 as i64)),
        username: user.map(|u| display_name(u.username.as_deref(), &u.first_name)),
        text: text.to_string(),
    })
}

/// `@username` when set, otherwise the first name.
fn display_name(username: Option<&str>, first_name: &str) -> String {
    match username.filter(|u| !u.is_empty()) {
        Some(u) => format!("@{u}"),
        None => first_name.to_string(),
    }
}

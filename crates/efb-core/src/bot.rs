//! Message dispatcher: prefix parsing, permission check, command lookup,
//! and the global error → reply mapping.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    assistant::Assistant,
    commands::{command_text, parse_invocation, CommandContext, CommandTable},
    config::Config,
    docs::DocumentationSource,
    domain::UserId,
    errors::Error,
    messaging::{port::MessagingPort, types::IncomingMessage},
    Result,
};

pub const PERMISSION_DENIED_REPLY: &str = "You don't have permission to use this command.";
pub const GENERIC_ERROR_REPLY: &str = "An error occurred while processing your command.";

pub struct EveBot {
    cfg: Arc<Config>,
    assistant: Assistant,
    docs: Arc<dyn DocumentationSource>,
    messenger: Arc<dyn MessagingPort>,
    table: CommandTable,
}

impl EveBot {
    pub fn new(
        cfg: Arc<Config>,
        assistant: Assistant,
        docs: Arc<dyn DocumentationSource>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            cfg,
            assistant,
            docs,
            messenger,
            table: CommandTable::builtin(),
        }
    }

    /// Handle one inbound message. Non-command chat is ignored.
    ///
    /// Command failures are answered in the chat; only a failure to send that
    /// answer is returned as an error.
    pub async fn handle_message(&self, msg: &IncomingMessage) -> Result<()> {
        let Some(inv) = parse_invocation(&self.cfg.command_prefix, &msg.text) else {
            return Ok(());
        };
        debug!(author = msg.author(), command = %inv.name, args = inv.args, "command received");

        let outcome = self.dispatch(msg, &inv.name, inv.args).await;
        let Err(err) = outcome else {
            return Ok(());
        };

        let reply = self.error_reply(&err);
        match &err {
            Error::CommandNotFound(_)
            | Error::MissingPermissions
            | Error::MissingArgument { .. }
            | Error::InvalidSubcommand { .. } => {
                info!(author = msg.author(), command = %inv.name, error = %err, "command rejected")
            }
            _ => error!(author = msg.author(), command = %inv.name, error = %err, "error processing command"),
        }

        self.messenger.send_text(msg.chat_id, &reply).await?;
        Ok(())
    }

    async fn dispatch(&self, msg: &IncomingMessage, name: &str, args: &str) -> Result<()> {
        if !is_permitted(msg.user_id, &self.cfg.allowed_users) {
            warn!(author = msg.author(), user_id = ?msg.user_id, "unauthorized command");
            return Err(Error::MissingPermissions);
        }

        let handler = self
            .table
            .get(name)
            .ok_or_else(|| Error::CommandNotFound(name.to_string()))?;

        let ctx = CommandContext {
            cfg: &self.cfg,
            assistant: &self.assistant,
            docs: self.docs.as_ref(),
            messenger: self.messenger.as_ref(),
            table: &self.table,
            chat_id: msg.chat_id,
            author: msg.author(),
        };
        handler.run(&ctx, args).await
    }

    /// User-facing text for a failed command.
    pub fn error_reply(&self, err: &Error) -> String {
        let prefix = &self.cfg.command_prefix;
        match err {
            Error::CommandNotFound(_) => format!(
                "Command not found. Use {} for a list of commands.",
                command_text(prefix, "help")
            ),
            Error::MissingPermissions => PERMISSION_DENIED_REPLY.to_string(),
            Error::MissingArgument { name, usage } => format!(
                "Missing required argument `{name}`. Usage: {}",
                command_text(prefix, usage)
            ),
            Error::InvalidSubcommand { group } => {
                let what = match *group {
                    "smart" => "smart assembly",
                    other => other,
                };
                format!(
                    "Invalid {what} command. Use {} for details.",
                    command_text(prefix, &format!("help {group}"))
                )
            }
            _ => GENERIC_ERROR_REPLY.to_string(),
        }
    }
}

/// An empty allow-list lets everyone in.
pub fn is_permitted(user_id: Option<UserId>, allowed_users: &[i64]) -> bool {
    if allowed_users.is_empty() {
        return true;
    }
    user_id.is_some_and(|id| allowed_users.contains(&id.0))
}

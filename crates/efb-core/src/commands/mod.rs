//! Prefix commands: parsing, the command table, and the built-in handlers.
//!
//! A command is `<prefix><name> [args]`, e.g. `!EVE smart create turret`.
//! Handlers are looked up by name in a [`CommandTable`]; groups such as
//! `smart` parse their own subcommands from `args`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{
    assistant::{Assistant, FALLBACK_REPLY},
    config::Config,
    docs::DocumentationSource,
    domain::ChatId,
    messaging::{delivery::send_chunked, port::MessagingPort, types::ChatAction},
    Result,
};

pub mod docs;
pub mod help;
pub mod smart;

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Lowercased command name.
    pub name: String,
    /// Everything after the name, trimmed.
    pub args: &'a str,
}

/// Parse `text` as a command if it starts with `prefix` (ASCII case-insensitive).
///
/// Returns `None` for ordinary chat and for a bare prefix.
pub fn parse_invocation<'a>(prefix: &str, text: &'a str) -> Option<Invocation<'a>> {
    let text = text.trim_start();
    let head = text.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    let rest = text[prefix.len()..].trim();
    let (name, args) = split_word(rest);
    if name.is_empty() {
        return None;
    }

    Some(Invocation {
        name: name.to_lowercase(),
        args,
    })
}

/// Split off the first whitespace-delimited word.
pub fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (s, ""),
    }
}

/// Render a command the way users type it, e.g. `` `!EVE help` ``.
pub fn command_text(prefix: &str, command: &str) -> String {
    if prefix.ends_with(char::is_whitespace) {
        format!("`{prefix}{command}`")
    } else {
        format!("`{prefix} {command}`")
    }
}

/// Everything a handler may touch while running one invocation.
pub struct CommandContext<'a> {
    pub cfg: &'a Config,
    pub assistant: &'a Assistant,
    pub docs: &'a dyn DocumentationSource,
    pub messenger: &'a dyn MessagingPort,
    pub table: &'a CommandTable,
    pub chat_id: ChatId,
    pub author: &'a str,
}

impl CommandContext<'_> {
    pub async fn reply(&self, text: &str) -> Result<()> {
        self.messenger.send_text(self.chat_id, text).await?;
        Ok(())
    }

    /// Ask the assistant and deliver its answer in message-sized chunks.
    pub async fn answer(&self, question: &str, context: Option<&str>) -> Result<()> {
        if self.messenger.capabilities().supports_chat_actions {
            if let Err(e) = self
                .messenger
                .send_chat_action(self.chat_id, ChatAction::Typing)
                .await
            {
                debug!(error = %e, "typing indicator failed");
            }
        }

        info!(author = self.author, question, "asking assistant");
        let mut response = self.assistant.ask(question, context).await;
        if response.trim().is_empty() {
            warn!(author = self.author, "assistant returned no text");
            response = FALLBACK_REPLY.to_string();
        }
        send_chunked(self.messenger, self.chat_id, &response, self.cfg.chunk_size).await?;
        Ok(())
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Usage line without the prefix, e.g. `smart create <type>`.
    fn usage(&self) -> &'static str;

    /// One-line description for the help overview.
    fn summary(&self) -> &'static str;

    /// Longer text for `help <command>`.
    fn details(&self) -> &'static str;

    async fn run(&self, ctx: &CommandContext<'_>, args: &str) -> Result<()>;
}

/// Command name → handler, in registration order.
#[derive(Clone, Default)]
pub struct CommandTable {
    entries: Vec<(String, Arc<dyn CommandHandler>)>,
}

impl CommandTable {
    /// The bot's built-in commands.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.register("help", Arc::new(help::HelpCommand));
        table.register("smart", Arc::new(smart::SmartCommand));
        table.register("docs", Arc::new(docs::DocsCommand));
        table
    }

    /// Register (or replace) a handler. Names are case-insensitive.
    pub fn register(&mut self, name: &str, handler: Arc<dyn CommandHandler>) {
        let name = name.to_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = handler,
            None => self.entries.push((name, handler)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn CommandHandler>> {
        let name = name.to_lowercase();
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, h)| h)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn CommandHandler>)> {
        self.entries.iter().map(|(n, h)| (n.as_str(), h))
    }
}

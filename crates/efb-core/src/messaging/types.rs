use crate::domain::{ChatId, UserId};

/// Cross-messenger incoming message.
///
/// Platform-specific fields stay in the adapter.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    pub text: String,
}

impl IncomingMessage {
    /// Name used in logs.
    pub fn author(&self) -> &str {
        self.username.as_deref().unwrap_or("unknown")
    }
}

/// Outgoing "chat action" (typing indicator, etc).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
}

/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_chat_actions: bool,
    pub max_message_len: usize,
}

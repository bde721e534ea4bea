//! Cross-messenger abstractions (Telegram today; Discord/Slack can sit behind the same port).

pub mod delivery;
pub mod port;
pub mod types;

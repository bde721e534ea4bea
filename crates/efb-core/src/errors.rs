use std::time::Duration;

/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can turn any failure into the right user-facing reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("missing permissions")]
    MissingPermissions,

    #[error("missing required argument `{name}`")]
    MissingArgument {
        name: &'static str,
        usage: &'static str,
    },

    #[error("invalid subcommand for `{group}`")]
    InvalidSubcommand { group: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

//! Provider-agnostic model interface (Anthropic HTTP today).

pub mod client;
pub mod types;

use serde::{Deserialize, Serialize};

/// The provider backend answering questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    AnthropicHttp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Normalized single-turn request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub stop_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

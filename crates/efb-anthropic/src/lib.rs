//! Anthropic adapter (Messages API).
//!
//! One non-streaming `POST /v1/messages` per question. Request building and
//! response parsing are plain functions so they can be tested offline.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use efb_core::{
    errors::Error,
    model::{
        client::ModelClient,
        types::{Completion, MessageRequest, ProviderKind, TokenUsage},
    },
    Result,
};

pub const API_VERSION: &str = "2023-06-01";
const ERROR_BODY_MAX_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Transport-level timeout for one HTTP exchange.
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct AnthropicClient {
    cfg: AnthropicConfig,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(cfg: AnthropicConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| Error::External(format!("anthropic http client error: {e}")))?;
        Ok(Self { cfg, http })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.cfg.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::AnthropicHttp
    }

    fn model_name(&self) -> &str {
        &self.cfg.model
    }

    async fn complete(&self, req: MessageRequest) -> Result<Completion> {
        let body = build_request(&self.cfg.model, &req);
        debug!(model = %self.cfg.model, max_tokens = req.max_tokens, "anthropic request");

        let resp = self
            .http
            .post(self.messages_url())
            .header("x-api-key", &self.cfg.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::External(format!("anthropic request error: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::External(format!("anthropic read error: {e}")))?;

        if !status.is_success() {
            return Err(Error::External(format!(
                "anthropic request failed: {status} {}",
                describe_error_body(&text)
            )));
        }

        parse_response(&text)
    }
}

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

pub fn build_request<'a>(model: &'a str, req: &'a MessageRequest) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens: req.max_tokens,
        system: &req.system,
        messages: vec![RequestMessage {
            role: "user",
            content: &req.user,
        }],
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Concatenate the text blocks of a Messages API response, in order.
pub fn parse_response(body: &str) -> Result<Completion> {
    let parsed: MessagesResponse = serde_json::from_str(body)?;

    let text = parsed
        .content
        .into_iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text)
        .collect::<Vec<_>>()
        .join("");

    Ok(Completion {
        text,
        stop_reason: parsed.stop_reason,
        usage: parsed.usage,
    })
}

/// `type: message` from an API error body, or the raw body truncated.
fn describe_error_body(body: &str) -> String {
    if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(body) {
        return format!("{}: {}", env.error.kind, env.error.message);
    }
    body.chars().take(ERROR_BODY_MAX_CHARS).collect()
}

//! In-memory port implementations for unit tests.

use std::{
    sync::{
        atomic::{AtomicI32, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    config::Config,
    docs::DocumentationSource,
    domain::{AssemblyType, ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{ChatAction, MessagingCapabilities},
    },
    model::{
        client::ModelClient,
        types::{Completion, MessageRequest, ProviderKind, TokenUsage},
    },
    Result,
};

pub fn test_config() -> Config {
    // Avoid Config::load() env dependency: hand-roll config.
    Config {
        telegram_bot_token: "x".to_string(),
        command_prefix: "!EVE ".to_string(),
        bot_status: "EVE Frontier Development".to_string(),
        allowed_users: vec![],
        anthropic_api_key: "sk-test".to_string(),
        anthropic_model: "claude-test".to_string(),
        anthropic_base_url: "http://localhost".to_string(),
        max_tokens: 4096,
        query_timeout: Duration::from_secs(5),
        chunk_size: 1990,
        docs_dir: None,
    }
}

pub struct FakeMessenger {
    max_len: usize,
    next_id: AtomicI32,
    fail_sends: AtomicUsize,
    sends: Mutex<Vec<(ChatId, String)>>,
    actions: AtomicUsize,
}

impl FakeMessenger {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            next_id: AtomicI32::new(1),
            fail_sends: AtomicUsize::new(0),
            sends: Mutex::new(Vec::new()),
            actions: AtomicUsize::new(0),
        }
    }

    /// Make the next `n` sends fail.
    pub fn fail_next_sends(&self, n: usize) {
        self.fail_sends.store(n, Ordering::SeqCst);
    }

    pub fn texts(&self, chat_id: ChatId) -> Vec<String> {
        self.sends
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == chat_id)
            .map(|(_, t)| t.clone())
            .collect()
    }

    pub fn actions(&self) -> usize {
        self.actions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_chat_actions: true,
            max_message_len: self.max_len,
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let pending = self.fail_sends.load(Ordering::SeqCst);
        if pending > 0 {
            self.fail_sends.store(pending - 1, Ordering::SeqCst);
            return Err(Error::External("send failed".to_string()));
        }
        self.sends
            .lock()
            .unwrap()
            .push((chat_id, text.to_string()));
        Ok(MessageRef {
            chat_id,
            message_id: MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)),
        })
    }

    async fn send_chat_action(&self, _chat_id: ChatId, _action: ChatAction) -> Result<()> {
        self.actions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakeModel {
    answer: std::result::Result<String, String>,
    delay: Duration,
    requests: Mutex<Vec<MessageRequest>>,
}

impl FakeModel {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            answer: Err(msg.to_string()),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<MessageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for FakeModel {
    fn provider(&self) -> ProviderKind {
        ProviderKind::AnthropicHttp
    }

    fn model_name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, req: MessageRequest) -> Result<Completion> {
        self.requests.lock().unwrap().push(req);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.answer {
            Ok(text) => Ok(Completion {
                text: text.clone(),
                stop_reason: Some("end_turn".to_string()),
                usage: Some(TokenUsage {
                    input_tokens: 10,
                    output_tokens: 20,
                }),
            }),
            Err(msg) => Err(Error::External(msg.clone())),
        }
    }
}

pub struct FailingDocs;

#[async_trait]
impl DocumentationSource for FailingDocs {
    async fn assembly_docs(&self, _assembly: &AssemblyType) -> Result<Option<String>> {
        Err(Error::External("docs offline".to_string()))
    }

    async fn search(&self, _query: &str) -> Result<Option<String>> {
        Err(Error::External("docs offline".to_string()))
    }
}

use std::{sync::Arc, time::Duration};

use tracing::{error, info};

use crate::{
    errors::Error,
    model::{client::ModelClient, types::MessageRequest},
    prompt::build_system_prompt,
    Result,
};

/// Reply sent in place of an answer when the model call fails.
pub const FALLBACK_REPLY: &str = "I encountered an error while processing your request.";

/// Single-shot question answering on top of a [`ModelClient`].
#[derive(Clone)]
pub struct Assistant {
    model: Arc<dyn ModelClient>,
    max_tokens: u32,
    timeout: Duration,
}

impl Assistant {
    pub fn new(model: Arc<dyn ModelClient>, max_tokens: u32, timeout: Duration) -> Self {
        Self {
            model,
            max_tokens,
            timeout,
        }
    }

    /// Ask once; failures are logged and replaced with [`FALLBACK_REPLY`].
    pub async fn ask(&self, query: &str, context: Option<&str>) -> String {
        match self.try_ask(query, context).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, model = self.model.model_name(), "error getting model response");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    pub async fn try_ask(&self, query: &str, context: Option<&str>) -> Result<String> {
        let req = MessageRequest {
            system: build_system_prompt(context),
            user: query.to_string(),
            max_tokens: self.max_tokens,
        };

        let completion = tokio::time::timeout(self.timeout, self.model.complete(req))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        if let Some(usage) = &completion.usage {
            info!(
                model = self.model.model_name(),
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = completion.stop_reason.as_deref().unwrap_or("-"),
                "model answered"
            );
        }
        Ok(completion.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeModel;

    #[tokio::test]
    async fn passes_system_prompt_and_question() {
        let model = Arc::new(FakeModel::answering("Build it."));
        let assistant = Assistant::new(model.clone(), 4096, Duration::from_secs(5));

        let out = assistant.ask("How?", Some("ctx")).await;
        assert_eq!(out, "Build it.");

        let reqs = model.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].user, "How?");
        assert_eq!(reqs[0].max_tokens, 4096);
        assert!(reqs[0].system.contains("Current context:\nctx"));
    }

    #[tokio::test]
    async fn falls_back_on_model_error() {
        let model = Arc::new(FakeModel::failing("boom"));
        let assistant = Assistant::new(model, 4096, Duration::from_secs(5));
        assert_eq!(assistant.ask("q", None).await, FALLBACK_REPLY);
        assert!(assistant.try_ask("q", None).await.is_err());
    }

    #[tokio::test]
    async fn times_out_slow_models() {
        let model = Arc::new(FakeModel::answering("late").with_delay(Duration::from_millis(200)));
        let assistant = Assistant::new(model, 4096, Duration::from_millis(10));
        let err = assistant.try_ask("q", None).await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }
}

use async_trait::async_trait;

use crate::Result;

use super::types::*;

/// Model client interface used by the assistant.
///
/// One request, one answer: no streaming and no conversation state.
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn provider(&self) -> ProviderKind;

    /// Model name as sent to the provider (for logs).
    fn model_name(&self) -> &str;

    async fn complete(&self, req: MessageRequest) -> Result<Completion>;
}

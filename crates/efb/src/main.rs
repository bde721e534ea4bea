use std::sync::Arc;

use tracing::info;

use efb_anthropic::{AnthropicClient, AnthropicConfig};
use efb_core::{
    assistant::Assistant,
    config::Config,
    docs::{DirectoryDocs, DocumentationSource, NoDocumentation},
    model::client::ModelClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    efb_core::logging::init("efb")?;

    let cfg = Arc::new(Config::load()?);

    let model: Arc<dyn ModelClient> = Arc::new(AnthropicClient::new(AnthropicConfig {
        api_key: cfg.anthropic_api_key.clone(),
        model: cfg.anthropic_model.clone(),
        base_url: cfg.anthropic_base_url.clone(),
        request_timeout: cfg.query_timeout,
    })?);
    info!(provider = ?model.provider(), model = model.model_name(), "model client ready");

    let assistant = Assistant::new(model, cfg.max_tokens, cfg.query_timeout);

    let docs: Arc<dyn DocumentationSource> = match &cfg.docs_dir {
        Some(dir) => {
            let docs = DirectoryDocs::new(dir);
            info!(dir = %docs.root().display(), "documentation context enabled");
            Arc::new(docs)
        }
        None => Arc::new(NoDocumentation),
    };

    efb_telegram::router::run_polling(cfg, assistant, docs).await
}

use async_trait::async_trait;
use tracing::warn;

use crate::{errors::Error, prompt::docs_question, Result};

use super::{split_word, CommandContext, CommandHandler};

/// `docs` command group (documentation search).
pub struct DocsCommand;

const SEARCH_USAGE: &str = "docs search <query>";

#[async_trait]
impl CommandHandler for DocsCommand {
    fn usage(&self) -> &'static str {
        SEARCH_USAGE
    }

    fn summary(&self) -> &'static str {
        "Search documentation"
    }

    fn details(&self) -> &'static str {
        "Documentation related commands.\n\n\
search <query> - Look the query up in the EVE Frontier docs and answer with the matches as context."
    }

    async fn run(&self, ctx: &CommandContext<'_>, args: &str) -> Result<()> {
        let (sub, rest) = split_word(args);
        match sub.to_lowercase().as_str() {
            "search" => search(ctx, rest).await,
            _ => Err(Error::InvalidSubcommand { group: "docs" }),
        }
    }
}

async fn search(ctx: &CommandContext<'_>, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::MissingArgument {
            name: "query",
            usage: SEARCH_USAGE,
        });
    }

    let context = match ctx.docs.search(query).await {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, query, "docs search failed");
            None
        }
    };

    ctx.answer(&docs_question(query), context.as_deref()).await
}

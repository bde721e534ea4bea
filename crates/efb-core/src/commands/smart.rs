use async_trait::async_trait;
use tracing::warn;

use crate::{domain::AssemblyType, errors::Error, prompt::assembly_question, Result};

use super::{split_word, CommandContext, CommandHandler};

/// `smart` command group (Smart Assembly guidance).
pub struct SmartCommand;

const CREATE_USAGE: &str = "smart create <type>";

#[async_trait]
impl CommandHandler for SmartCommand {
    fn usage(&self) -> &'static str {
        CREATE_USAGE
    }

    fn summary(&self) -> &'static str {
        "Get guidance on creating a Smart Assembly"
    }

    fn details(&self) -> &'static str {
        "Smart Assembly related commands.\n\n\
create <type> - Step-by-step guidance for building a Smart Assembly.\n\
Known types: ssu (Storage Unit), turret, gate. Other names are passed through as typed."
    }

    async fn run(&self, ctx: &CommandContext<'_>, args: &str) -> Result<()> {
        let (sub, rest) = split_word(args);
        match sub.to_lowercase().as_str() {
            "create" => create(ctx, rest).await,
            _ => Err(Error::InvalidSubcommand { group: "smart" }),
        }
    }
}

async fn create(ctx: &CommandContext<'_>, args: &str) -> Result<()> {
    if args.trim().is_empty() {
        return Err(Error::MissingArgument {
            name: "type",
            usage: CREATE_USAGE,
        });
    }
    let assembly = AssemblyType::from_arg(args);

    // Missing docs degrade the answer, they do not fail the command.
    let context = match ctx.docs.assembly_docs(&assembly).await {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, assembly = assembly.label(), "assembly docs lookup failed");
            None
        }
    };

    ctx.answer(&assembly_question(&assembly), context.as_deref())
        .await
}

use async_trait::async_trait;

use crate::{domain::AssemblyKind, errors::Error, Result};

use super::{command_text, split_word, CommandContext, CommandHandler, CommandTable};

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    fn usage(&self) -> &'static str {
        "help [command]"
    }

    fn summary(&self) -> &'static str {
        "Show this help message"
    }

    fn details(&self) -> &'static str {
        "Shows the list of commands, or details for one command."
    }

    async fn run(&self, ctx: &CommandContext<'_>, args: &str) -> Result<()> {
        let prefix = &ctx.cfg.command_prefix;
        let (topic, _) = split_word(args);

        let text = if topic.is_empty() {
            overview(prefix, ctx.table)
        } else {
            let topic = topic.to_lowercase();
            let handler = ctx
                .table
                .get(&topic)
                .ok_or_else(|| Error::CommandNotFound(topic.clone()))?;
            format!(
                "{}\n\n{}",
                command_text(prefix, handler.usage()),
                handler.details()
            )
        };

        ctx.reply(&text).await
    }
}

/// The help overview, built from the command table.
pub fn overview(prefix: &str, table: &CommandTable) -> String {
    let mut out = String::from("EVE Frontier Development Assistant\n\nBasic Commands:\n");
    for (_, handler) in table.iter() {
        out.push_str(&format!(
            "{} - {}\n",
            command_text(prefix, handler.usage()),
            handler.summary()
        ));
    }

    out.push_str("\nSmart Assembly Types:\n");
    for kind in AssemblyKind::ALL {
        out.push_str(&format!("- {}\n", kind.display_name()));
    }

    out.push_str(&format!(
        "\nUse {} for more detailed information about a specific command.",
        command_text(prefix, "help <command>")
    ));
    out
}

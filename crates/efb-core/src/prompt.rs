//! System prompt + user question templates for the assistant.

use crate::domain::AssemblyType;

const NO_CONTEXT: &str = "No additional context provided";

/// Build the assistant persona, with optional documentation context appended.
///
/// Blank context is treated the same as no context.
pub fn build_system_prompt(context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_CONTEXT);

    format!(
        "You are an EVE Frontier development assistant specializing in Smart Assembly creation and MUD framework integration.\n\
Your goal is to help developers create and modify Smart Assemblies.\n\
\n\
Current context:\n\
{context}\n"
    )
}

pub fn assembly_question(assembly: &AssemblyType) -> String {
    format!("How do I create a {} Smart Assembly?", assembly.label())
}

pub fn docs_question(query: &str) -> String {
    format!("Using the EVE Frontier documentation, answer the following: {}", query.trim())
}

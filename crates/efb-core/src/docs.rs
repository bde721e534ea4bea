//! Documentation context for assistant prompts.
//!
//! The assistant answers better with the relevant EVE Frontier docs in its
//! system prompt. Sources return `None` when they have nothing relevant.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{domain::AssemblyType, Result};

const DOC_EXTENSIONS: [&str; 2] = ["md", "txt"];
const MAX_SEARCH_HITS: usize = 20;
/// Upper bound on context handed to the prompt builder.
pub const MAX_CONTEXT_CHARS: usize = 8000;

#[async_trait]
pub trait DocumentationSource: Send + Sync {
    async fn assembly_docs(&self, assembly: &AssemblyType) -> Result<Option<String>>;

    async fn search(&self, query: &str) -> Result<Option<String>>;
}

/// Source used when no documentation directory is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDocumentation;

#[async_trait]
impl DocumentationSource for NoDocumentation {
    async fn assembly_docs(&self, _assembly: &AssemblyType) -> Result<Option<String>> {
        Ok(None)
    }

    async fn search(&self, _query: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Plain-text docs read from a directory (`*.md`, `*.txt`, non-recursive).
///
/// `turret.md` documents the Turret assembly, `storage_unit.md` the SSU, and
/// so on; every file takes part in search.
#[derive(Clone, Debug)]
pub struct DirectoryDocs {
    root: PathBuf,
}

impl DirectoryDocs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn doc_files(&self) -> Result<Vec<PathBuf>> {
        let mut rd = tokio::fs::read_dir(&self.root).await?;
        let mut files = Vec::new();
        while let Some(ent) = rd.next_entry().await? {
            let path = ent.path();
            let is_doc = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| DOC_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if is_doc && ent.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl DocumentationSource for DirectoryDocs {
    async fn assembly_docs(&self, assembly: &AssemblyType) -> Result<Option<String>> {
        let slug = assembly.slug();
        for path in self.doc_files().await? {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_lowercase());
            if stem.as_deref() != Some(slug.as_str()) {
                continue;
            }
            debug!(path = %path.display(), "using assembly docs");
            let text = tokio::fs::read_to_string(&path).await?;
            return Ok(non_blank(truncate_chars(&text, MAX_CONTEXT_CHARS)));
        }
        Ok(None)
    }

    async fn search(&self, query: &str) -> Result<Option<String>> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Ok(None);
        }

        let mut hits = Vec::new();
        for path in self.doc_files().await? {
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(t) => t,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable doc");
                    continue;
                }
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            hits.extend(matching_lines(&name, &text, &terms));
            if hits.len() >= MAX_SEARCH_HITS {
                hits.truncate(MAX_SEARCH_HITS);
                break;
            }
        }

        debug!(query, hits = hits.len(), "docs search");
        Ok(non_blank(truncate_chars(&hits.join("\n"), MAX_CONTEXT_CHARS)))
    }
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// `file: line` for every line containing all terms (case-insensitive).
fn matching_lines(name: &str, text: &str, terms: &[String]) -> Vec<String> {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            terms.iter().all(|t| lower.contains(t.as_str()))
        })
        .map(|line| format!("{name}: {}", line.trim()))
        .collect()
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

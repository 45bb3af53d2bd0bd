//! Bulk import of comments from a JSON export.
//!
//! The document shape is `{"comments": [{"author", "text", "likes", "image"}]}`.
//! Loading replaces every existing comment.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::models::{CommentDraft, NewAuthor};
use crate::repo::Repo;

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Deserialize)]
pub struct SeedComment {
    #[serde(default = "unknown_author")]
    pub author: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub image: Option<String>,
}

fn unknown_author() -> String { "Unknown".into() }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub cleared: usize,
    pub created: usize,
    pub authors: usize,
}

pub fn parse_seed(bytes: &[u8]) -> anyhow::Result<SeedFile> {
    serde_json::from_slice(bytes).context("invalid seed JSON")
}

pub async fn load_seed(repo: &dyn Repo, path: &Path) -> anyhow::Result<SeedSummary> {
    let bytes = std::fs::read(path).with_context(|| format!("reading seed file '{}'", path.display()))?;
    let seed = parse_seed(&bytes)?;
    info!("read {} comments from '{}'", seed.comments.len(), path.display());
    import(repo, seed).await
}

pub async fn import(repo: &dyn Repo, seed: SeedFile) -> anyhow::Result<SeedSummary> {
    let cleared = repo.clear_comments().await?;
    if cleared > 0 {
        info!("cleared {cleared} existing comments");
    }
    repo.ensure_author(NewAuthor::admin()).await?;

    let mut authors = HashMap::new();
    for c in &seed.comments {
        if !authors.contains_key(&c.author) {
            let author = repo.ensure_author(NewAuthor::from_display_name(&c.author)).await?;
            authors.insert(c.author.clone(), author.id);
        }
    }

    let mut created = 0;
    for c in seed.comments {
        let author = authors[&c.author];
        repo.create_comment(CommentDraft { text: c.text, author, likes: c.likes, image: c.image }).await?;
        created += 1;
    }
    let summary = SeedSummary { cleared, created, authors: repo.count_authors().await? };
    info!(created = summary.created, authors = summary.authors, "seed import complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let seed = parse_seed(br#"{"comments":[{"text":"hi"}]}"#).unwrap();
        assert_eq!(seed.comments[0].author, "Unknown");
        assert_eq!(seed.comments[0].likes, 0);
        assert!(seed.comments[0].image.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_seed(b"{comments:").is_err());
    }
}

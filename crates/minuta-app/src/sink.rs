//! Card creation.
//!
//! A `TaskRewriter` turns an extracted action item into a card title, and a
//! `CardSink` persists the resulting `CardRequest`.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use minuta_core::error::{MinutaError, Result};
use minuta_core::types::ActionItem;

/// A card ready to be written to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRequest {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub description: String,
    pub item: ActionItem,
}

impl CardRequest {
    pub fn new(title: String, item: ActionItem) -> Self {
        let description = format!(
            "{} ({})\n{}",
            item.meeting_title, item.meeting_date, item.document_url
        );
        Self {
            title,
            due_date: item.due_date,
            description,
            item,
        }
    }
}

// =============================================================================
// Rewriters
// =============================================================================

/// Rewrites an extracted task into a card title.
#[async_trait]
pub trait TaskRewriter: Send + Sync {
    async fn rewrite(&self, item: &ActionItem) -> Result<String>;
}

/// Keeps the task text, upper-casing its first letter.
pub struct PassthroughRewriter;

#[async_trait]
impl TaskRewriter for PassthroughRewriter {
    async fn rewrite(&self, item: &ActionItem) -> Result<String> {
        let mut chars = item.task.chars();
        Ok(match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        })
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Destination for created cards.
#[async_trait]
pub trait CardSink: Send + Sync {
    async fn create_card(&self, card: &CardRequest) -> Result<()>;
}

/// Appends one JSON object per card to a file.
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CardSink for JsonLinesSink {
    async fn create_card(&self, card: &CardRequest) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut line = serde_json::to_string(card)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| MinutaError::Sink(format!("{}: {}", self.path.display(), e)))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %self.path.display(), title = %card.title, "Card appended");
        Ok(())
    }
}

/// Prints each card as one JSON line on stdout.
pub struct StdoutSink;

#[async_trait]
impl CardSink for StdoutSink {
    async fn create_card(&self, card: &CardRequest) -> Result<()> {
        let line = serde_json::to_string(card)?;
        println!("{}", line);
        Ok(())
    }
}

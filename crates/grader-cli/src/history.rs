//! Local history of evaluated prompts
//!
//! Entries are kept newest first and persisted as a JSON array. The store
//! never grows beyond its capacity; the oldest entries fall off the end.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use grader_core::{Error, Evaluation, Result, Suggestion};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

pub const DEFAULT_HISTORY_FILE: &str = "prompt_history.json";
pub const HISTORY_CAPACITY: usize = 50;

/// One evaluated prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub prompt: String,
    pub score: u8,
    pub label: String,
    pub suggestions: Vec<Suggestion>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(prompt: &str, evaluation: &Evaluation) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.to_string(),
            score: evaluation.score,
            label: evaluation.label.clone(),
            suggestions: evaluation.suggestions.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// File-backed prompt history
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    file_path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    /// Open the history at `file_path`, loading it if the file exists
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_capacity(file_path, HISTORY_CAPACITY)
    }

    pub fn with_capacity(file_path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Configuration(
                "history capacity must be at least 1".to_string(),
            ));
        }

        let mut store = Self {
            entries: Vec::new(),
            file_path: file_path.as_ref().to_path_buf(),
            capacity,
        };

        if store.file_path.exists() {
            if let Err(e) = store.load_sync() {
                warn!(path = %store.file_path.display(), error = %e, "failed to load history");
            }
        }

        Ok(store)
    }

    fn load_sync(&mut self) -> Result<()> {
        let content = std::fs::read_to_string(&self.file_path)?;
        self.replace(serde_json::from_str(&content)?);
        Ok(())
    }

    /// Reload entries from disk
    pub async fn load(&mut self) -> Result<()> {
        let content = fs::read_to_string(&self.file_path).await?;
        self.replace(serde_json::from_str(&content)?);
        Ok(())
    }

    fn replace(&mut self, mut entries: Vec<HistoryEntry>) {
        entries.truncate(self.capacity);
        self.entries = entries;
    }

    /// Write entries to disk
    pub async fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file_path, json).await?;
        Ok(())
    }

    /// Record an evaluation as the newest entry and persist
    pub async fn add(&mut self, prompt: &str, evaluation: &Evaluation) -> Result<&HistoryEntry> {
        self.entries.insert(0, HistoryEntry::new(prompt, evaluation));
        self.entries.truncate(self.capacity);
        self.save().await?;
        Ok(&self.entries[0])
    }

    /// Drop every entry and persist
    pub async fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save().await
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

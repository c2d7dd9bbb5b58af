//! Per-session conversation history.

use crate::plots::{DataFrame, Figure};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TurnContent {
    Text(String),
    Chart(Figure),
    DataFrame(DataFrame),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Shared by every entry produced while handling one user message.
    pub turn_id: Uuid,
    pub role: Role,
    pub content: TurnContent,
    pub created_at: DateTime<Utc>,
}

/// Append-only list of entries; only [`History::reset`] removes anything.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn_id: Uuid, role: Role, content: TurnContent) {
        self.entries.push(HistoryEntry {
            turn_id,
            role,
            content,
            created_at: Utc::now(),
        });
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends every entry to `path`, one JSON object per line.
    pub fn save_jsonl(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open history file {}", path.display()))?;
        for entry in &self.entries {
            file.write_all(serde_json::to_string(entry)?.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }
}

//! Commit and file change types

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// Author name used when the repository records none
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Author email used when the repository records none
pub const UNKNOWN_EMAIL: &str = "unknown@example.com";

/// A structured commit, built once from the repository and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full hex object id
    pub hash: String,
    /// Author display name
    #[serde(default = "default_author")]
    pub author: String,
    /// Author email
    #[serde(default = "default_email")]
    pub email: String,
    /// Commit timestamp, keeping the recorded timezone
    #[serde(default = "now")]
    pub date: DateTime<FixedOffset>,
    /// First line of the commit message
    #[serde(default)]
    pub message: String,
    /// Lines added across the whole commit
    #[serde(default)]
    pub insertions: usize,
    /// Lines removed across the whole commit
    #[serde(default)]
    pub deletions: usize,
    /// Number of files touched
    #[serde(default)]
    pub files_changed: usize,
    /// Per-file change records for pure content modifications
    #[serde(default)]
    pub changes: Vec<FileChange>,
}

fn default_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

fn default_email() -> String {
    UNKNOWN_EMAIL.to_string()
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

impl Commit {
    /// Create a commit record with the given hash and default metadata
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            author: default_author(),
            email: default_email(),
            date: now(),
            message: String::new(),
            insertions: 0,
            deletions: 0,
            files_changed: 0,
            changes: Vec::new(),
        }
    }

    /// Set the author, keeping the sentinel when the name is blank
    #[must_use]
    pub fn with_author(mut self, name: &str, email: &str) -> Self {
        if !name.trim().is_empty() {
            self.author = name.to_string();
        }
        if !email.trim().is_empty() {
            self.email = email.to_string();
        }
        self
    }

    /// Set the commit timestamp
    #[must_use]
    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = date;
        self
    }

    /// Set the commit summary line
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the aggregate line and file statistics
    #[must_use]
    pub fn with_stats(mut self, insertions: usize, deletions: usize, files_changed: usize) -> Self {
        self.insertions = insertions;
        self.deletions = deletions;
        self.files_changed = files_changed;
        self
    }

    /// Attach the per-file change records
    #[must_use]
    pub fn with_changes(mut self, changes: Vec<FileChange>) -> Self {
        self.changes = changes;
        self
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(i, _)| i);
        &self.hash[..end]
    }
}

/// One contiguous change region of a unified diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// First line of the region in the old file (1-based)
    pub old_start: u32,
    /// First line of the region in the new file (1-based)
    pub new_start: u32,
    /// Added lines, without the leading `+`
    pub added: Vec<String>,
    /// Removed lines, without the leading `-`
    pub removed: Vec<String>,
    /// Any other line inside the hunk
    pub context: Vec<String>,
}

impl Hunk {
    /// Start an empty hunk at the given positions
    #[must_use]
    pub fn new(old_start: u32, new_start: u32) -> Self {
        Self {
            old_start,
            new_start,
            ..Default::default()
        }
    }
}

/// A change record for one file of a commit
///
/// Serialized without a tag, so each variant produces exactly its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileChange {
    /// The diff was parsed and summarized
    Normal {
        /// Path of the file
        file: String,
        /// Language inferred from the extension
        language: String,
        /// Function and class names seen in the diff
        changed_functions: Vec<String>,
        /// Parsed hunks
        hunks: Vec<Hunk>,
        /// One sentence per non-empty hunk
        summary: Vec<String>,
    },
    /// The diff exceeded the size guard and was not parsed
    TooLarge {
        /// Path of the file
        file: String,
        /// Why the file was not summarized
        warning: String,
    },
    /// The diff could not be produced or parsed
    Failed {
        /// Path of the file
        file: String,
        /// What went wrong
        error: String,
    },
}

impl FileChange {
    /// Path of the file this record describes
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::Normal { file, .. } | Self::TooLarge { file, .. } | Self::Failed { file, .. } => {
                file
            }
        }
    }

    /// Summary sentences; empty for skipped or failed files
    #[must_use]
    pub fn summary(&self) -> &[String] {
        match self {
            Self::Normal { summary, .. } => summary,
            _ => &[],
        }
    }

    /// Hunks; empty for skipped or failed files
    #[must_use]
    pub fn hunks(&self) -> &[Hunk] {
        match self {
            Self::Normal { hunks, .. } => hunks,
            _ => &[],
        }
    }
}

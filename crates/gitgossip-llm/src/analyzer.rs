// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The analysis backend interface

use gitgossip_git::Commit;
use serde::{Deserialize, Serialize};

/// Title returned when a merge request diff is empty
pub const NO_CHANGES_TITLE: &str = "No changes detected";

/// Description returned when a merge request diff is empty
pub const NO_CHANGES_DESCRIPTION: &str = "No differences found between branches.";

/// Prefix marking a result that stands in for a failed backend call
pub const ERROR_TAG: &str = "[LLM ERROR]";

/// Title and description for a merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestSummary {
    /// Short, action-oriented title
    pub title: String,
    /// Bullet list, one `- item` per line
    pub description: String,
}

impl MergeRequestSummary {
    /// Create a summary from its parts
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// The fixed result for an empty diff
    #[must_use]
    pub fn no_changes() -> Self {
        Self::new(NO_CHANGES_TITLE, NO_CHANGES_DESCRIPTION)
    }

    /// Whether this result stands in for a failed backend call
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.title.starts_with(ERROR_TAG)
    }
}

/// Turns commits or diffs into prose
///
/// Implementations never fail: backend problems come back as text tagged
/// with [`ERROR_TAG`].
pub trait Analyzer {
    /// Produce a changelog-style narrative for the commits
    fn analyze_commits(&self, commits: &[Commit]) -> String;

    /// Produce a merge request title and description from a raw diff
    fn generate_mr_summary(&self, diff_text: &str) -> MergeRequestSummary;
}

impl<T: Analyzer + ?Sized> Analyzer for Box<T> {
    fn analyze_commits(&self, commits: &[Commit]) -> String {
        (**self).analyze_commits(commits)
    }

    fn generate_mr_summary(&self, diff_text: &str) -> MergeRequestSummary {
        (**self).generate_mr_summary(diff_text)
    }
}

/// Extract a title and bullet list from model output
///
/// A `Title:` line (any case) gives the title; `Description:` lines are
/// skipped; lines starting with `-` are collected as bullets. Without a
/// title line the title falls back to "Auto-generated Merge Request".
#[must_use]
pub fn parse_mr_output(output: &str) -> MergeRequestSummary {
    let mut title = String::new();
    let mut bullets = Vec::new();

    for line in output.lines() {
        let lowered = line.to_lowercase();
        if lowered.starts_with("title:") {
            title = line
                .split_once(':')
                .map(|(_, rest)| rest.trim().to_string())
                .unwrap_or_default();
        } else if lowered.starts_with("description:") {
            continue;
        } else if line.trim().starts_with('-') {
            bullets.push(line.trim());
        }
    }

    if title.is_empty() {
        title = "Auto-generated Merge Request".to_string();
    }
    MergeRequestSummary::new(title, bullets.join("\n"))
}

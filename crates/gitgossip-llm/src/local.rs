// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Deterministic analyzer that needs no network

use gitgossip_git::Commit;

use crate::analyzer::{Analyzer, MergeRequestSummary};

/// Formats commits and diffs locally
#[derive(Debug, Clone, Copy)]
pub struct LocalAnalyzer {
    verbosity: u8,
}

impl Default for LocalAnalyzer {
    fn default() -> Self {
        Self { verbosity: 1 }
    }
}

impl LocalAnalyzer {
    /// Create an analyzer; verbosity above 1 adds per-file highlights
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    fn describe(&self, commit: &Commit) -> String {
        let mut summary = format!(
            "Commit `{}` by {}: {} (+{}/-{}, {} files).",
            commit.short_hash(),
            commit.author,
            commit.message,
            commit.insertions,
            commit.deletions,
            commit.files_changed
        );

        if self.verbosity > 1 && !commit.changes.is_empty() {
            summary.push_str("\n  Highlights:");
            for change in commit.changes.iter().take(2) {
                let first: Vec<&str> = change
                    .summary()
                    .iter()
                    .take(2)
                    .map(String::as_str)
                    .collect();
                summary.push_str(&format!("\n   - {}: {}", change.file(), first.join("; ")));
            }
        }

        summary
    }
}

impl Analyzer for LocalAnalyzer {
    fn analyze_commits(&self, commits: &[Commit]) -> String {
        if commits.is_empty() {
            return "No commits found to analyze.".to_string();
        }
        commits
            .iter()
            .map(|c| self.describe(c))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn generate_mr_summary(&self, diff_text: &str) -> MergeRequestSummary {
        if diff_text.trim().is_empty() {
            return MergeRequestSummary::no_changes();
        }

        let total_lines = diff_text.lines().count();
        let changed_files = diff_text
            .lines()
            .filter(|line| line.starts_with("diff --git"))
            .count();

        let description = [
            format!("- Total diff lines analyzed: {total_lines}"),
            format!("- Files impacted: {changed_files}"),
            "- Simulated code changes detected successfully.".to_string(),
            "- (This is a mock summary; no real LLM used.)".to_string(),
        ]
        .join("\n");

        MergeRequestSummary::new(
            format!("Mock MR Summary for {changed_files} files changed"),
            description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitgossip_git::FileChange;
    use similar_asserts::assert_eq;

    fn sample_commit() -> Commit {
        let normal = |file: &str, summary: &[&str]| FileChange::Normal {
            file: file.to_string(),
            language: "python".to_string(),
            changed_functions: vec![],
            hunks: vec![],
            summary: summary.iter().map(ToString::to_string).collect(),
        };
        Commit::new("123456789abcdef")
            .with_author("osman", "e@email.com")
            .with_message("Initial commit")
            .with_stats(10, 2, 3)
            .with_changes(vec![
                normal("main.py", &["added main function", "added docstring", "third"]),
                normal("utils.py", &["refactored helpers"]),
                normal("extra.py", &["never shown"]),
            ])
    }

    #[test]
    fn test_no_commits() {
        let analyzer = LocalAnalyzer::default();
        assert_eq!(analyzer.analyze_commits(&[]), "No commits found to analyze.");
    }

    #[test]
    fn test_single_commit_summary() {
        let result = LocalAnalyzer::default().analyze_commits(&[sample_commit()]);
        assert!(result.contains("`1234567`"));
        assert!(result.contains("by osman"));
        assert!(result.contains("Initial commit"));
        assert!(result.contains("(+10/-2, 3 files)"));
        assert!(!result.contains("Highlights"));
    }

    #[test]
    fn test_multiple_commits() {
        let other = Commit::new("abcdef123456789")
            .with_author("nahid", "e@email.com")
            .with_message("Fix bug")
            .with_stats(2, 1, 1);
        let result = LocalAnalyzer::default().analyze_commits(&[sample_commit(), other]);
        let parts: Vec<&str> = result.split("\n\n").collect();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains("by osman"));
        assert!(parts[1].contains("by nahid"));
    }

    #[test]
    fn test_verbose_mode_includes_highlights() {
        let result = LocalAnalyzer::new(2).analyze_commits(&[sample_commit()]);
        assert!(result.contains("Highlights:"));
        assert!(result.contains("   - main.py: added main function; added docstring"));
        assert!(result.contains("   - utils.py: refactored helpers"));
        assert!(!result.contains("third"));
        assert!(!result.contains("extra.py"));
    }

    #[test]
    fn test_verbose_skipped_file_has_empty_highlight() {
        let commit = Commit::new("abcdef0").with_changes(vec![FileChange::TooLarge {
            file: "big.txt".to_string(),
            warning: "too large".to_string(),
        }]);
        let result = LocalAnalyzer::new(3).analyze_commits(&[commit]);
        assert!(result.ends_with("\n   - big.txt: "));
    }

    #[test]
    fn test_mr_summary_empty_diff() {
        let analyzer = LocalAnalyzer::default();
        assert_eq!(
            analyzer.generate_mr_summary("  \n\t"),
            MergeRequestSummary::no_changes()
        );
    }

    #[test]
    fn test_mr_summary_counts_files() {
        let diff = "diff --git a/a.py b/a.py\n@@ -1 +1 @@\n-x\n+y\ndiff --git a/b.py b/b.py\n@@ -1 +1 @@\n-x\n+y";
        let summary = LocalAnalyzer::default().generate_mr_summary(diff);
        assert_eq!(summary.title, "Mock MR Summary for 2 files changed");
        assert!(summary.description.contains("- Total diff lines analyzed: 8"));
        assert!(summary.description.contains("- Files impacted: 2"));
        assert_eq!(summary.description.lines().count(), 4);
    }
}

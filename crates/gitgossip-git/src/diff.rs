// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-file diff extraction
//!
//! Turns a `git2::Diff` into [`FileChange`] records. Only pure content
//! modifications are summarized; noise files are skipped, oversized diffs are
//! flagged, and a failure on one file never affects the others.

use git2::{Delta, Diff, Patch};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commit::FileChange;
use crate::error::GitError;
use crate::summarizer::summarize_diff;

/// Default cap on the size of a single file's diff text
pub const DEFAULT_MAX_DIFF_SIZE: usize = 50_000;

/// Which files to skip and how much diff text to accept per file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSettings {
    /// File names that are never summarized (lockfiles and the like)
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,
    /// File name suffixes of generated artifacts
    #[serde(default = "default_ignore_extensions")]
    pub ignore_extensions: Vec<String>,
    /// Largest diff text, in bytes, that is parsed into hunks
    #[serde(default = "default_max_diff_size")]
    pub max_diff_size: usize,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            ignore_files: default_ignore_files(),
            ignore_extensions: default_ignore_extensions(),
            max_diff_size: default_max_diff_size(),
        }
    }
}

fn default_ignore_files() -> Vec<String> {
    [
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "poetry.lock",
        "poetry.toml",
        "uv.lock",
        "Pipfile.lock",
        "requirements.txt",
        "Cargo.lock",
        "composer.lock",
        "Gemfile.lock",
        "go.sum",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_ignore_extensions() -> Vec<String> {
    [
        ".lock", ".pyc", ".pyo", ".class", ".o", ".so", ".min.js", ".min.css", ".map", ".log",
        ".csv",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_max_diff_size() -> usize {
    DEFAULT_MAX_DIFF_SIZE
}

impl DiffSettings {
    /// Check whether a path should be left out of the change records
    ///
    /// Extensions are matched as file name suffixes so that compound ones
    /// such as `.min.js` work.
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.ignore_files.iter().any(|f| f == name)
            || self.ignore_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Build the change record for one file from its decoded diff text
    ///
    /// Returns `None` when there is nothing to report.
    #[must_use]
    pub fn file_change(&self, file: &str, diff_text: &str) -> Option<FileChange> {
        if diff_text.is_empty() {
            return None;
        }
        if diff_text.len() > self.max_diff_size {
            debug!(file, size = diff_text.len(), "Diff exceeds size limit");
            return Some(FileChange::TooLarge {
                file: file.to_string(),
                warning: format!(
                    "Diff too large to summarize ({} bytes, limit {})",
                    diff_text.len(),
                    self.max_diff_size
                ),
            });
        }
        let summary = summarize_diff(file, diff_text);
        Some(FileChange::Normal {
            file: file.to_string(),
            language: summary.language,
            changed_functions: summary.changed_functions,
            hunks: summary.hunks,
            summary: summary.summary,
        })
    }
}

/// Build change records for every modified file in a diff
#[must_use]
pub fn extract_changes(diff: &Diff<'_>, settings: &DiffSettings) -> Vec<FileChange> {
    let mut changes = Vec::new();

    for (idx, delta) in diff.deltas().enumerate() {
        if delta.status() != Delta::Modified {
            continue;
        }

        let file = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_else(|| "<unknown>".to_string());

        if settings.is_ignored(&file) {
            debug!(file = %file, "Skipping ignored file");
            continue;
        }

        match patch_text(diff, idx) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                if let Some(change) = settings.file_change(&file, &text) {
                    changes.push(change);
                }
            }
            Err(e) => {
                warn!(file = %file, error = %e, "Failed to read diff");
                changes.push(FileChange::Failed {
                    file,
                    error: e.to_string(),
                });
            }
        }
    }

    changes
}

/// Render the hunks of one delta as unified diff text, without file headers
fn patch_text(diff: &Diff<'_>, idx: usize) -> Result<Vec<u8>, GitError> {
    let mut out = Vec::new();
    let Some(patch) = Patch::from_diff(diff, idx)? else {
        return Ok(out);
    };

    for hunk_idx in 0..patch.num_hunks() {
        let (hunk, _) = patch.hunk(hunk_idx)?;
        out.extend_from_slice(hunk.header());
        if !out.ends_with(b"\n") {
            out.push(b'\n');
        }

        for line_idx in 0..patch.num_lines_in_hunk(hunk_idx)? {
            let line = patch.line_in_hunk(hunk_idx, line_idx)?;
            let origin = line.origin();
            if !matches!(origin, '+' | '-' | ' ') {
                continue;
            }
            out.push(origin as u8);
            out.extend_from_slice(line.content());
            if !out.ends_with(b"\n") {
                out.push(b'\n');
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_ignores() {
        let settings = DiffSettings::default();
        assert!(settings.is_ignored("poetry.lock"));
        assert!(settings.is_ignored("uv.lock"));
        assert!(settings.is_ignored("poetry.toml"));
        assert!(settings.is_ignored("backend/requirements.txt"));
        assert!(settings.is_ignored("vendor/deps.lock"));
        assert!(settings.is_ignored("frontend/package-lock.json"));
        assert!(settings.is_ignored("static/app.min.js"));
        assert!(settings.is_ignored("build/Main.class"));
        assert!(settings.is_ignored("reports/out.csv"));
        assert!(settings.is_ignored("bundle.js.map"));
        assert!(!settings.is_ignored("static/app.js"));
        assert!(!settings.is_ignored("src/poetry.lock.md"));
        assert!(!settings.is_ignored("README.md"));
        assert!(!settings.is_ignored("pyproject.toml"));
        assert!(!settings.is_ignored("requirements-dev.txt"));
    }

    #[test]
    fn test_custom_ignores() {
        let settings = DiffSettings {
            ignore_files: vec!["VERSION".to_string()],
            ignore_extensions: vec![".snap".to_string()],
            ..Default::default()
        };
        assert!(settings.is_ignored("VERSION"));
        assert!(settings.is_ignored("tests/out.snap"));
        assert!(!settings.is_ignored("poetry.lock"));
    }

    #[test]
    fn test_file_change_normal() {
        let settings = DiffSettings::default();
        let change = settings
            .file_change("app.py", "@@ -1 +1,2 @@\n def main():\n+    run()\n")
            .expect("change");
        match change {
            FileChange::Normal {
                file,
                language,
                changed_functions,
                hunks,
                summary,
            } => {
                assert_eq!(file, "app.py");
                assert_eq!(language, "python");
                assert_eq!(changed_functions, vec!["main".to_string()]);
                assert_eq!(hunks.len(), 1);
                assert_eq!(
                    summary,
                    vec!["Added 1 new lines in app.py around line 1.".to_string()]
                );
            }
            other => panic!("Expected normal change, got {other:?}"),
        }
    }

    #[test]
    fn test_file_change_empty_text_is_skipped() {
        assert!(DiffSettings::default().file_change("a.py", "").is_none());
    }

    #[test]
    fn test_file_change_too_large() {
        let settings = DiffSettings {
            max_diff_size: 10,
            ..Default::default()
        };
        let change = settings
            .file_change("big.txt", "@@ -1 +1 @@\n+0123456789\n")
            .expect("change");
        assert!(matches!(change, FileChange::TooLarge { ref file, .. } if file == "big.txt"));

        let value = serde_json::to_value(&change).expect("serialize");
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("warning"));
        assert!(!obj.contains_key("hunks"));
        assert!(!obj.contains_key("summary"));
    }

    #[test]
    fn test_file_change_at_limit_is_parsed() {
        let text = "@@ -1 +1 @@\n+x\n";
        let settings = DiffSettings {
            max_diff_size: text.len(),
            ..Default::default()
        };
        assert!(matches!(
            settings.file_change("a.txt", text),
            Some(FileChange::Normal { .. })
        ));
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: DiffSettings =
            serde_json::from_str(r#"{"max_diff_size": 1000}"#).expect("deserialize");
        assert_eq!(settings.max_diff_size, 1000);
        assert_eq!(settings.ignore_files, DiffSettings::default().ignore_files);
    }
}

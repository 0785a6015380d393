// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Unified diff parsing and plain-language summaries
//!
//! This module turns the text of a single file's unified diff into hunks,
//! a list of touched function/class names, and one short sentence per hunk.
//! It works on text only and never touches the repository.
//!
//! # Example
//!
//! ```
//! use gitgossip_git::summarizer::summarize_diff;
//!
//! let diff = "@@ -1,2 +1,3 @@\n line one\n+line two\n line three\n";
//! let summary = summarize_diff("notes.py", diff);
//! assert_eq!(summary.language, "python");
//! assert_eq!(summary.summary, vec!["Added 1 new lines in notes.py around line 1."]);
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::commit::Hunk;

/// Language reported for extensions missing from the lookup table
pub const UNKNOWN_LANGUAGE: &str = "unknown";

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@").expect("valid hunk header regex")
});

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:def|class|function)\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("valid definition regex")
});

/// Structured view of one file's diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSummary {
    /// Language inferred from the file extension
    pub language: String,
    /// Distinct function/class names found anywhere in the diff
    pub changed_functions: Vec<String>,
    /// Parsed hunks in diff order
    pub hunks: Vec<Hunk>,
    /// One sentence per hunk that adds or removes lines
    pub summary: Vec<String>,
}

/// Parse and summarize the diff of `file`
#[must_use]
pub fn summarize_diff(file: &str, diff_text: &str) -> DiffSummary {
    let hunks = parse_hunks(diff_text);
    let summary = summary_lines(file, &hunks);
    DiffSummary {
        language: language_for(file).to_string(),
        changed_functions: changed_functions(diff_text),
        hunks,
        summary,
    }
}

/// Map a file path to a language name by its extension
#[must_use]
pub fn language_for(file: &str) -> &'static str {
    let ext = Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        "py" => "python",
        "go" => "go",
        "js" => "javascript",
        "ts" => "typescript",
        "java" => "java",
        "sh" => "bash",
        "yaml" | "yml" => "yaml",
        _ => UNKNOWN_LANGUAGE,
    }
}

/// Split unified diff text into hunks
///
/// Lines before the first valid `@@` header, and lines following a header
/// that does not parse, belong to no hunk and are dropped.
#[must_use]
pub fn parse_hunks(diff_text: &str) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut current: Option<Hunk> = None;

    for line in diff_text.lines() {
        if line.starts_with("@@") {
            if let Some(done) = current.take() {
                hunks.push(done);
            }
            current = parse_header(line).map(|(old_start, new_start)| Hunk::new(old_start, new_start));
            continue;
        }

        let Some(hunk) = current.as_mut() else {
            continue;
        };

        if let Some(rest) = line.strip_prefix('+').filter(|_| !line.starts_with("+++")) {
            hunk.added.push(rest.to_string());
        } else if let Some(rest) = line.strip_prefix('-').filter(|_| !line.starts_with("---")) {
            hunk.removed.push(rest.to_string());
        } else {
            hunk.context.push(line.to_string());
        }
    }

    if let Some(done) = current {
        hunks.push(done);
    }
    hunks
}

fn parse_header(line: &str) -> Option<(u32, u32)> {
    let caps = HUNK_HEADER.captures(line)?;
    let old_start = caps.get(1)?.as_str().parse().ok()?;
    let new_start = caps.get(2)?.as_str().parse().ok()?;
    Some((old_start, new_start))
}

/// Collect `def`/`class`/`function` names from every line of the diff
///
/// The leading diff marker is stripped first, so added, removed and context
/// lines all count. Names are deduplicated; callers must not rely on the
/// order, which currently follows first appearance.
#[must_use]
pub fn changed_functions(diff_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for line in diff_text.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            continue;
        }
        let body = line
            .strip_prefix(['+', '-', ' '])
            .unwrap_or(line);
        if let Some(name) = DEFINITION.captures(body).and_then(|c| c.get(1)) {
            let name = name.as_str();
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Describe each hunk in one sentence
///
/// Hunks with neither additions nor removals produce no sentence.
#[must_use]
pub fn summary_lines(file: &str, hunks: &[Hunk]) -> Vec<String> {
    hunks
        .iter()
        .filter_map(|hunk| {
            let added = hunk.added.len();
            let removed = hunk.removed.len();
            let line = hunk.new_start;
            match (added, removed) {
                (0, 0) => None,
                (a, 0) => Some(format!("Added {a} new lines in {file} around line {line}.")),
                (0, r) => Some(format!("Removed {r} lines from {file} around line {line}.")),
                (a, r) => Some(format!(
                    "Modified {} lines in {file} ({r} removed, {a} added near line {line}).",
                    a + r
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_added_only_hunk() {
        let diff = "@@ -8,2 +10,5 @@\n keep\n+one\n+two\n+three\n keep\n";
        let summary = summarize_diff("app.py", diff);
        assert_eq!(
            summary.summary,
            vec!["Added 3 new lines in app.py around line 10.".to_string()]
        );
    }

    #[test]
    fn test_modified_hunk() {
        let diff = "@@ -18,4 +20,6 @@\n-old a\n-old b\n+new a\n+new b\n+new c\n+new d\n";
        let summary = summarize_diff("svc.go", diff);
        assert_eq!(
            summary.summary,
            vec!["Modified 6 lines in svc.go (2 removed, 4 added near line 20).".to_string()]
        );
    }

    #[test]
    fn test_removed_only_hunk() {
        let diff = "@@ -5,3 +5,1 @@\n ctx\n-gone\n-also gone\n";
        let summary = summarize_diff("run.sh", diff);
        assert_eq!(
            summary.summary,
            vec!["Removed 2 lines from run.sh around line 5.".to_string()]
        );
    }

    #[test]
    fn test_context_only_hunk_has_no_sentence() {
        let diff = "@@ -1,2 +1,2 @@\n same\n same again\n";
        let summary = summarize_diff("a.txt", diff);
        assert_eq!(summary.hunks.len(), 1);
        assert!(summary.summary.is_empty());
    }

    #[test]
    fn test_hunk_positions_and_lines() {
        let diff = "\
@@ -1 +1,2 @@
 first
+second
@@ -30,3 +31,3 @@ fn tail()
-old
+new
 end
";
        let hunks = parse_hunks(diff);
        assert_eq!(hunks.len(), 2);
        assert_eq!((hunks[0].old_start, hunks[0].new_start), (1, 1));
        assert_eq!(hunks[0].added, vec!["second".to_string()]);
        assert_eq!(hunks[0].context, vec![" first".to_string()]);
        assert_eq!((hunks[1].old_start, hunks[1].new_start), (30, 31));
        assert_eq!(hunks[1].removed, vec!["old".to_string()]);
        assert_eq!(hunks[1].added, vec!["new".to_string()]);
    }

    #[test]
    fn test_malformed_header_drops_following_lines() {
        let diff = "\
@@ -1,1 +1,2 @@
+kept
@@ garbage @@
+dropped
-dropped too
@@ -9,1 +10,1 @@
+kept again
";
        let hunks = parse_hunks(diff);
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].added, vec!["kept".to_string()]);
        assert_eq!(hunks[1].new_start, 10);
        assert_eq!(hunks[1].added, vec!["kept again".to_string()]);
    }

    #[test]
    fn test_lines_before_first_header_are_ignored() {
        let diff = "diff --git a/x.py b/x.py\n--- a/x.py\n+++ b/x.py\n+stray\n";
        assert!(parse_hunks(diff).is_empty());
    }

    #[test]
    fn test_file_headers_inside_hunk_are_context() {
        let diff = "@@ -1 +1 @@\n--- not removed\n+++ not added\n";
        let hunks = parse_hunks(diff);
        assert!(hunks[0].added.is_empty());
        assert!(hunks[0].removed.is_empty());
        assert_eq!(hunks[0].context.len(), 2);
    }

    #[test]
    fn test_changed_functions_across_line_kinds() {
        let diff = "\
@@ -1,6 +1,8 @@
 class Loader:
-    def old_load(self):
+    def load(self):
+function render(props) {
 def load(self):
";
        let names = changed_functions(diff);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["Loader", "load", "old_load", "render"]);
    }

    #[test]
    fn test_changed_functions_ignores_non_definitions() {
        let diff = "@@ -1 +1 @@\n+x = define(1)\n+classify(y)\n";
        assert!(changed_functions(diff).is_empty());
    }

    #[test]
    fn test_language_lookup() {
        assert_eq!(language_for("a/b/c.py"), "python");
        assert_eq!(language_for("main.go"), "go");
        assert_eq!(language_for("web/index.js"), "javascript");
        assert_eq!(language_for("web/index.ts"), "typescript");
        assert_eq!(language_for("App.java"), "java");
        assert_eq!(language_for("run.sh"), "bash");
        assert_eq!(language_for("ci.yaml"), "yaml");
        assert_eq!(language_for("ci.yml"), "yaml");
        assert_eq!(language_for("lib.rs"), UNKNOWN_LANGUAGE);
        assert_eq!(language_for("Makefile"), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_empty_diff() {
        let summary = summarize_diff("x.py", "");
        assert!(summary.hunks.is_empty());
        assert!(summary.summary.is_empty());
        assert!(summary.changed_functions.is_empty());
    }
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Presentation of summaries as text or JSON

use std::io::{self, Write};

use gitgossip_git::Commit;
use gitgossip_llm::{Analyzer, MergeRequestSummary};
use serde::Serialize;

use crate::service::{RepositoryOutcome, RepositoryReport, SummaryReport};

/// JSON shape for one repository when several were summarized
#[derive(Debug, Serialize)]
struct RepositoryCommits<'a> {
    repository: String,
    commits: &'a [Commit],
}

/// Pretty JSON for the extracted commits
///
/// A single repository yields its array of commits. Several repositories
/// yield an array of `{ repository, commits }` for those that were read.
///
/// # Errors
///
/// Returns the serialization error, which does not happen for well-formed
/// commits.
pub fn commits_json(report: &SummaryReport) -> serde_json::Result<String> {
    if let [only] = report.repositories.as_slice() {
        let commits: &[Commit] = match &only.outcome {
            RepositoryOutcome::Commits(commits) => commits,
            _ => &[],
        };
        return serde_json::to_string_pretty(commits);
    }

    let entries: Vec<RepositoryCommits<'_>> = report
        .repositories
        .iter()
        .filter_map(|r| match &r.outcome {
            RepositoryOutcome::Commits(commits) => Some(RepositoryCommits {
                repository: r.path.display().to_string(),
                commits,
            }),
            _ => None,
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Notice for a skipped repository, if it was skipped
#[must_use]
pub fn notice(repo: &RepositoryReport) -> Option<String> {
    match &repo.outcome {
        RepositoryOutcome::Commits(_) => None,
        RepositoryOutcome::NoCommits => Some(format!("No commits found in {}.", repo.name())),
        RepositoryOutcome::Failed(error) => Some(format!(
            "Invalid repository at {}: {error}",
            repo.path.display()
        )),
    }
}

/// Write notices for every skipped repository
///
/// # Errors
///
/// Returns any write error.
pub fn write_notices(out: &mut impl Write, report: &SummaryReport) -> io::Result<()> {
    for line in report.repositories.iter().filter_map(notice) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Write each repository's prose under a heading
///
/// Skipped repositories get their notice in place of the prose.
///
/// # Errors
///
/// Returns any write error.
pub fn write_text(
    out: &mut impl Write,
    report: &SummaryReport,
    analyzer: &dyn Analyzer,
) -> io::Result<()> {
    if report.repositories.len() > 1 {
        writeln!(
            out,
            "Found {} repositories under {}\n",
            report.repositories.len(),
            report.root.display()
        )?;
    }

    for repo in &report.repositories {
        writeln!(out, "=== {} ===", repo.name())?;
        match &repo.outcome {
            RepositoryOutcome::Commits(commits) => {
                writeln!(out, "{}", analyzer.analyze_commits(commits))?;
            }
            _ => {
                if let Some(line) = notice(repo) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write a merge request summary
///
/// # Errors
///
/// Returns any write error.
pub fn write_merge_request(out: &mut impl Write, summary: &MergeRequestSummary) -> io::Result<()> {
    writeln!(out, "Title: {}", summary.title)?;
    writeln!(out)?;
    writeln!(out, "Description:")?;
    writeln!(out, "{}", summary.description)
}

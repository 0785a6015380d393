// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Multi-repository summarization
//!
//! This module ties the git layer to an [`Analyzer`]: it finds the
//! repositories under a path, extracts each one's commits with a shared
//! filter, and produces merge request summaries from branch diffs.
//!
//! # Example
//!
//! ```no_run
//! use gitgossip::service::SummarizerService;
//! use gitgossip_git::{CommitFilter, DiffSettings};
//!
//! let service = SummarizerService::new(DiffSettings::default());
//! let report = service
//!     .summarize_path(".", &CommitFilter::latest(20))
//!     .expect("summarize");
//! println!("{} repositories with commits", report.with_commits());
//! ```

use std::path::{Path, PathBuf};

use gitgossip_git::{Commit, CommitFilter, DiffSettings, GitError, GitRepo, locate};
use gitgossip_llm::{Analyzer, MergeRequestSummary};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Remote fetched by `--pull`
pub const DEFAULT_REMOTE: &str = "origin";

/// Title returned when the branch diff is empty
pub const NO_CODE_CHANGES_TITLE: &str = "No code changes detected";

/// Description returned when the branch diff is empty
pub const NO_CODE_CHANGES_DESCRIPTION: &str =
    "There are no differences between the current branch and the target branch.";

/// Service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Git error
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Nothing to summarize under the given path
    #[error("No Git repositories found in {path}")]
    NoRepositories {
        /// The path that was searched
        path: String,
    },
}

/// What happened to one repository
#[derive(Debug, Clone)]
pub enum RepositoryOutcome {
    /// Commits matching the filter, newest first (possibly none)
    Commits(Vec<Commit>),
    /// HEAD has no commits or is detached; skipped
    NoCommits,
    /// The repository could not be read; skipped
    Failed(String),
}

/// One repository's result
#[derive(Debug, Clone)]
pub struct RepositoryReport {
    /// Repository root
    pub path: PathBuf,
    /// Outcome for this repository
    pub outcome: RepositoryOutcome,
}

impl RepositoryReport {
    /// Directory name used as the repository heading
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Results for every repository found under a path
#[derive(Debug, Clone, Default)]
pub struct SummaryReport {
    /// The path that was searched
    pub root: PathBuf,
    /// One entry per repository, in discovery order
    pub repositories: Vec<RepositoryReport>,
}

impl SummaryReport {
    /// Number of repositories that produced a commit list
    #[must_use]
    pub fn with_commits(&self) -> usize {
        self.count(|o| matches!(o, RepositoryOutcome::Commits(_)))
    }

    /// Number of repositories skipped for having no commits
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RepositoryOutcome::NoCommits))
    }

    /// Number of repositories that could not be read
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RepositoryOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&RepositoryOutcome) -> bool) -> usize {
        self.repositories.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// High-level API for summarizing repositories
#[derive(Debug, Clone, Default)]
pub struct SummarizerService {
    settings: DiffSettings,
}

impl SummarizerService {
    /// Create a service extracting diffs with `settings`
    #[must_use]
    pub fn new(settings: DiffSettings) -> Self {
        Self { settings }
    }

    /// Diff settings in use
    #[must_use]
    pub fn settings(&self) -> &DiffSettings {
        &self.settings
    }

    /// Extract commits from every repository under `root`
    ///
    /// Repositories are processed one after another; a repository without
    /// commits or one that fails to open is recorded and skipped.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Git` if `root` does not exist and
    /// `ServiceError::NoRepositories` if it holds no repositories.
    pub fn summarize_path(
        &self,
        root: impl AsRef<Path>,
        filter: &CommitFilter,
    ) -> Result<SummaryReport, ServiceError> {
        let root = root.as_ref();
        let repos = locate(root)?;
        if repos.is_empty() {
            return Err(ServiceError::NoRepositories {
                path: root.display().to_string(),
            });
        }
        info!(path = %root.display(), repositories = repos.len(), "Summarizing repositories");

        let repositories = repos
            .into_iter()
            .map(|path| {
                let outcome = self.summarize_repository(&path, filter);
                RepositoryReport { path, outcome }
            })
            .collect();

        Ok(SummaryReport {
            root: root.to_path_buf(),
            repositories,
        })
    }

    /// Extract commits from a single repository
    #[must_use]
    pub fn summarize_repository(&self, path: &Path, filter: &CommitFilter) -> RepositoryOutcome {
        let repo = match GitRepo::open(path) {
            Ok(repo) => repo,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping repository");
                return RepositoryOutcome::Failed(e.to_string());
            }
        };

        if !repo.has_commits() {
            info!(path = %path.display(), "Repository has no commits, skipping");
            return RepositoryOutcome::NoCommits;
        }

        match repo.commits(filter, &self.settings) {
            Ok(commits) => {
                info!(path = %path.display(), commits = commits.len(), "Extracted commits");
                RepositoryOutcome::Commits(commits)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read commits, skipping");
                RepositoryOutcome::Failed(e.to_string())
            }
        }
    }

    /// Unified diff of HEAD against the merge base with `target`
    ///
    /// With `pull`, `target` is first fetched from `origin` and the diff is
    /// taken against `origin/<target>`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Git` if the repository, remote or branch cannot
    /// be resolved.
    pub fn merge_request_diff(
        &self,
        path: impl AsRef<Path>,
        target: &str,
        pull: bool,
    ) -> Result<String, ServiceError> {
        let repo = GitRepo::discover(path)?;
        let reference = if pull {
            repo.fetch_branch(DEFAULT_REMOTE, target)?;
            format!("{DEFAULT_REMOTE}/{target}")
        } else {
            target.to_string()
        };
        debug!(reference = %reference, "Diffing against target");
        Ok(repo.diff_between_branches(&reference)?)
    }

    /// Merge request title and description for HEAD against `target`
    ///
    /// An empty diff short-circuits without consulting the analyzer.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::merge_request_diff`].
    pub fn summarize_for_merge_request(
        &self,
        path: impl AsRef<Path>,
        target: &str,
        pull: bool,
        analyzer: &dyn Analyzer,
    ) -> Result<MergeRequestSummary, ServiceError> {
        let diff = self.merge_request_diff(path, target, pull)?;
        if diff.trim().is_empty() {
            info!(target, "No differences against target branch");
            return Ok(MergeRequestSummary::new(
                NO_CODE_CHANGES_TITLE,
                NO_CODE_CHANGES_DESCRIPTION,
            ));
        }
        debug!(target, diff_bytes = diff.len(), "Generating merge request summary");
        Ok(analyzer.generate_mr_summary(&diff))
    }
}

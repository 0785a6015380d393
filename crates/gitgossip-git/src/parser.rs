// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git commit walking and commit record assembly
//!
//! This module opens repositories with the `git2` crate, walks history with
//! the filters from [`CommitFilter`], and assembles [`Commit`] records with
//! their per-file changes.

use crate::commit::Commit;
use crate::diff::{DiffSettings, extract_changes};
use crate::error::GitError;
use crate::filter::CommitFilter;
use chrono::{DateTime, FixedOffset, Utc};
use git2::{Diff, DiffFormat, DiffOptions, Repository, Sort};
use std::path::Path;
use tracing::{debug, warn};

/// Number of context lines around each change
const CONTEXT_LINES: u32 = 3;

/// A git repository wrapper for reading commits
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path does not exist or is
    /// not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Get the repository path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Check whether HEAD points at a commit on a branch
    ///
    /// False for freshly initialised repositories (unborn HEAD) and for a
    /// detached HEAD.
    #[must_use]
    pub fn has_commits(&self) -> bool {
        if self.repo.head_detached().unwrap_or(true) {
            return false;
        }
        self.repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .is_ok()
    }

    /// Walk commits reachable from HEAD, newest first, applying the filter
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the repository cannot be walked.
    pub fn walk_commits(&self, filter: &CommitFilter) -> Result<Vec<git2::Commit<'_>>, GitError> {
        let mut commits = Vec::new();
        if filter.limit == 0 {
            return Ok(commits);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
        revwalk.push_head()?;

        let author = filter.author_matcher();

        for oid_result in revwalk {
            let oid = oid_result?;
            let git_commit = self.repo.find_commit(oid)?;

            if let Some(since) = filter.since {
                let committed = DateTime::<Utc>::from_timestamp(git_commit.time().seconds(), 0);
                if committed.is_some_and(|t| t < since) {
                    continue;
                }
            }

            if let Some(ref matcher) = author {
                let signature = git_commit.author();
                let name = String::from_utf8_lossy(signature.name_bytes());
                let email = String::from_utf8_lossy(signature.email_bytes());
                if !matcher.matches(&name, &email) {
                    continue;
                }
            }

            commits.push(git_commit);
            if commits.len() >= filter.limit {
                break;
            }
        }

        Ok(commits)
    }

    /// Walk commits and build full records including per-file changes
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the repository cannot be walked.
    pub fn commits(
        &self,
        filter: &CommitFilter,
        settings: &DiffSettings,
    ) -> Result<Vec<Commit>, GitError> {
        let walked = self.walk_commits(filter)?;
        Ok(walked
            .iter()
            .map(|git_commit| self.build_commit(git_commit, settings))
            .collect())
    }

    /// Assemble a commit record
    ///
    /// A commit whose diff cannot be computed is still returned, with zero
    /// statistics and no changes.
    #[must_use]
    pub fn build_commit(&self, git_commit: &git2::Commit<'_>, settings: &DiffSettings) -> Commit {
        let hash = git_commit.id().to_string();
        let signature = git_commit.author();
        let message = git_commit
            .summary_bytes()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();

        let mut commit = Commit::new(hash)
            .with_author(
                &String::from_utf8_lossy(signature.name_bytes()),
                &String::from_utf8_lossy(signature.email_bytes()),
            )
            .with_message(message);

        if let Some(date) = commit_date(git_commit) {
            commit = commit.with_date(date);
        }

        match self.first_parent_diff(git_commit) {
            Ok(diff) => {
                match diff.stats() {
                    Ok(stats) => {
                        commit = commit.with_stats(
                            stats.insertions(),
                            stats.deletions(),
                            stats.files_changed(),
                        );
                    }
                    Err(e) => warn!(sha = %commit.hash, error = %e, "Failed to compute diff stats"),
                }
                let changes = extract_changes(&diff, settings);
                debug!(sha = %commit.hash, changes = changes.len(), "Extracted changes");
                commit = commit.with_changes(changes);
            }
            Err(e) => {
                warn!(sha = %commit.hash, error = %e, "Failed to diff commit, keeping it without changes");
            }
        }

        commit
    }

    /// Diff a commit against its first parent, or the empty tree for a root commit
    fn first_parent_diff(&self, git_commit: &git2::Commit<'_>) -> Result<Diff<'_>, GitError> {
        let tree = git_commit.tree()?;
        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.context_lines(CONTEXT_LINES);

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        Ok(diff)
    }

    /// Unified diff of HEAD against its merge base with `target`
    ///
    /// Equivalent to `git diff <target>...HEAD`. The result is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if `target` cannot be resolved.
    pub fn diff_between_branches(&self, target: &str) -> Result<String, GitError> {
        let target_commit = self
            .repo
            .revparse_single(target)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::InvalidReference {
                reference: target.to_string(),
            })?;
        let head_commit = self.repo.head()?.peel_to_commit()?;

        let base_oid = self.repo.merge_base(target_commit.id(), head_commit.id())?;
        let base_tree = self.repo.find_commit(base_oid)?.tree()?;
        let head_tree = head_commit.tree()?;

        let mut opts = DiffOptions::new();
        opts.context_lines(CONTEXT_LINES);
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?;

        let mut buf = Vec::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let origin = line.origin();
            if matches!(origin, '+' | '-' | ' ') {
                buf.push(origin as u8);
            }
            buf.extend_from_slice(line.content());
            true
        })?;

        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }

    /// Fetch `branch` from `remote` into `refs/remotes/<remote>/<branch>`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the remote does not exist or the fetch fails.
    pub fn fetch_branch(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        let mut git_remote = self.repo.find_remote(remote)?;
        let refspec = format!("refs/heads/{branch}:refs/remotes/{remote}/{branch}");
        debug!(remote, branch, "Fetching target branch");
        git_remote.fetch(&[refspec.as_str()], None, None)?;
        Ok(())
    }
}

/// Committer time with the recorded timezone
fn commit_date(git_commit: &git2::Commit<'_>) -> Option<DateTime<FixedOffset>> {
    let time = git_commit.time();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::<Utc>::from_timestamp(time.seconds(), 0).map(|t| t.with_timezone(&offset))
}

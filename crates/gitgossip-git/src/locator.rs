// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository discovery
//!
//! A path is either a repository root itself or a directory whose immediate
//! children may be repository roots.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::GitError;

/// Check whether a directory is the top of a git working tree
///
/// Both `.git` directories and `.git` files (worktrees, submodules) count.
#[must_use]
pub fn is_repository_root(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Find the repositories to process under `root`
///
/// Returns `[root]` if `root` is a repository, otherwise every immediate child
/// that is one, ordered by file name. Unreadable entries are logged and
/// skipped.
///
/// # Errors
///
/// Returns `GitError::PathNotFound` if `root` does not exist.
pub fn locate(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, GitError> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(GitError::PathNotFound {
            path: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        debug!(path = %root.display(), "Not a directory, no repositories");
        return Ok(Vec::new());
    }
    if is_repository_root(root) {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut repos = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_dir() && is_repository_root(entry.path()) {
                    repos.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(path = %root.display(), error = %e, "Skipping unreadable entry");
            }
        }
    }

    debug!(path = %root.display(), found = repos.len(), "Scanned for repositories");
    Ok(repos)
}

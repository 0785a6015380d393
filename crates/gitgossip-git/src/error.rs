// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitgossip-git

use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Path does not exist on disk
    #[error("Path does not exist: {path}")]
    PathNotFound {
        /// The missing path
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// A commit filter value could not be understood
    #[error("Invalid filter value '{value}': {reason}")]
    InvalidFilter {
        /// The rejected value as given by the user
        value: String,
        /// What was wrong with it
        reason: String,
    },
}

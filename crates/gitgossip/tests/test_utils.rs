// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for gitgossip integration tests
//!
//! This module provides utilities for:
//! - Temporary directory management
//! - Git repository scaffolding with deterministic timestamps
//! - JSON lookup helpers
//! - Environment isolation

#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use git2::{
    BranchType, IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature, Time,
    build::CheckoutBuilder,
};

// ============================================================================
// Temporary Directory Management
// ============================================================================

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is automatically cleaned up when dropped
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    /// Create a new, unique temporary test directory
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "gitgossip-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);
        fs::create_dir_all(&path).expect("Failed to create temp test directory");
        Self { path }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a subdirectory within the temp directory
    pub fn create_subdir(&self, name: &str) -> PathBuf {
        let subdir = self.path.join(name);
        fs::create_dir_all(&subdir).expect("Failed to create subdirectory");
        subdir
    }

    /// Create a file within the temp directory with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// First commit timestamp; each later commit is one minute newer
const BASE_TIME: i64 = 1_760_000_000;

/// A throwaway git repository whose default branch is `main`
pub struct TestGitRepo {
    temp_dir: TempTestDir,
    repo: Repository,
    clock: Cell<i64>,
}

impl TestGitRepo {
    /// Create and initialize a repository in a fresh temp directory
    pub fn new(test_name: &str) -> Self {
        let temp_dir = TempTestDir::new(test_name);
        let repo = init_repo(temp_dir.path());
        Self {
            temp_dir,
            repo,
            clock: Cell::new(BASE_TIME),
        }
    }

    /// Get the path to the working tree
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file into the working tree
    pub fn create_file(&self, relative_path: &str, content: &str) -> &Self {
        self.temp_dir.create_file(relative_path, content);
        self
    }

    /// Stage everything and commit as the default test author
    pub fn commit(&self, message: &str) -> String {
        self.commit_as("Test Author", "test@example.com", message)
    }

    /// Stage everything and commit as the given author
    pub fn commit_as(&self, name: &str, email: &str, message: &str) -> String {
        commit_all(&self.repo, name, email, message, self.tick()).to_string()
    }

    /// Create a file and commit it in one step
    pub fn create_and_commit(&self, relative_path: &str, content: &str, message: &str) -> String {
        self.create_file(relative_path, content);
        self.commit(message)
    }

    /// Create multiple commits for testing
    pub fn create_commits(&self, count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                self.create_and_commit(
                    &format!("file_{i}.txt"),
                    &format!("Content {i}"),
                    &format!("Commit {i}"),
                )
            })
            .collect()
    }

    /// Number of commits reachable from HEAD
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("revwalk");
        walk.push_head().expect("push head");
        walk.count()
    }

    /// Create a branch at HEAD and switch to it
    pub fn checkout_new_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("HEAD commit");
        self.repo.branch(name, &head, false).expect("create branch");
        self.checkout(name);
    }

    /// Switch to an existing local branch, updating the working tree
    pub fn checkout(&self, name: &str) {
        self.repo
            .find_branch(name, BranchType::Local)
            .expect("branch exists");
        self.repo
            .set_head(&format!("refs/heads/{name}"))
            .expect("set head");
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))
            .expect("checkout head");
    }

    fn tick(&self) -> i64 {
        let now = self.clock.get();
        self.clock.set(now + 60);
        now
    }
}

/// Initialize a repository with `main` as the initial branch
pub fn init_repo(path: &Path) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    Repository::init_opts(path, &opts).expect("Failed to init repository")
}

/// Stage all changes (including deletions) and commit on HEAD
pub fn commit_all(repo: &Repository, name: &str, email: &str, message: &str, time: i64) -> Oid {
    let mut index = repo.index().expect("index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("add all");
    index.update_all(["*"], None).expect("update all");
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");

    let sig = Signature::new(name, email, &Time::new(time, 0)).expect("signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit")
}

// ============================================================================
// JSON Helpers
// ============================================================================

/// Check if a JSON array contains an object with a specific field value
pub fn json_array_contains(
    array: &serde_json::Value,
    field: &str,
    value: &serde_json::Value,
) -> bool {
    array
        .as_array()
        .is_some_and(|arr| arr.iter().any(|item| item.get(field) == Some(value)))
}

// ============================================================================
// Environment Isolation
// ============================================================================

/// Temporarily set an environment variable for a test
///
/// The original value is restored when the guard is dropped.
pub struct EnvGuard {
    key: String,
    original: Option<String>,
}

impl EnvGuard {
    /// Set an environment variable, returning a guard that restores it on drop
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: test code owns these variables
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Remove an environment variable, returning a guard that restores it on drop
    pub fn remove(key: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: test code owns these variables
        unsafe { std::env::remove_var(key) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: test code owns these variables
        unsafe {
            match &self.original {
                Some(val) => std::env::set_var(&self.key, val),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

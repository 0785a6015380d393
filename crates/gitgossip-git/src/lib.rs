// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitgossip-git: commit and diff extraction for gitgossip
//!
//! This library crate finds repositories, walks their history with author,
//! date and count filters, and turns each commit's diff into structured,
//! summarized change records.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitgossip_git::{CommitFilter, DiffSettings, GitRepo};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let commits = repo
//!     .commits(&CommitFilter::latest(10), &DiffSettings::default())
//!     .expect("walk commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_hash(), c.message);
//!     for change in &c.changes {
//!         println!("  {}: {:?}", change.file(), change.summary());
//!     }
//! }
//! ```

pub mod commit;
pub mod diff;
pub mod error;
pub mod filter;
pub mod locator;
pub mod parser;
pub mod summarizer;

pub use commit::{Commit, FileChange, Hunk};
pub use diff::DiffSettings;
pub use error::GitError;
pub use filter::{CommitFilter, parse_since};
pub use locator::locate;
pub use parser::GitRepo;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, FileChange, Hunk};
    pub use crate::diff::DiffSettings;
    pub use crate::error::GitError;
    pub use crate::filter::CommitFilter;
    pub use crate::parser::GitRepo;
}

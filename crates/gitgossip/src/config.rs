// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for gitgossip
//!
//! This module defines the CLI surface: global logging flags, the settings
//! file override and the subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gitgossip_git::filter::DEFAULT_LIMIT;

use crate::settings::{Settings, SettingsError};

/// GitGossip - human-friendly git summaries for developers
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gitgossip")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the settings file
    ///
    /// Defaults to `gitgossip/config.toml` in the platform config directory.
    #[arg(short, long, global = true, env = "GITGOSSIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with JSON output.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive setup wizard for the settings file
    Init,

    /// Summarize recent commits of one repository or every repository under a directory
    ///
    /// Example:
    ///   gitgossip summarize ~/src --since 7days --author alice
    Summarize {
        /// Repository, or directory containing repositories
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Filter by author name or email (regular expression)
        #[arg(short, long)]
        author: Option<String>,

        /// Only commits since this point (e.g. '7days' or '2025-10-01')
        #[arg(short, long)]
        since: Option<String>,

        /// Maximum commits per repository
        #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Print the extracted commits as JSON instead of prose
        #[arg(long)]
        json: bool,

        /// Use the local analyzer instead of the language model
        #[arg(long)]
        use_mock: bool,

        /// Detail level of the local analyzer (2 or more adds file highlights)
        #[arg(long, default_value_t = 1)]
        verbosity: u8,
    },

    /// Generate a merge request title and description against a target branch
    SummarizeMr {
        /// Branch to compare against (e.g. main or develop)
        target_branch: String,

        /// Path to the git repository
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Fetch the latest target branch from origin before diffing
        #[arg(long)]
        pull: bool,

        /// Use the local analyzer instead of the language model
        #[arg(long)]
        use_mock: bool,
    },

    /// Team digest (coming soon)
    Digest,
}

impl Config {
    /// Settings file path, from `--config` or the platform default
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoConfigDir` when no override is given and the
    /// platform has no config directory.
    pub fn settings_path(&self) -> Result<PathBuf, SettingsError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Settings::default_path(),
        }
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

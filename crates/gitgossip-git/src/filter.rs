// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit filters: author, date and count

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::error::GitError;

/// Default number of commits returned by a walk
pub const DEFAULT_LIMIT: usize = 100;

/// Which commits to return from a walk
#[derive(Debug, Clone)]
pub struct CommitFilter {
    /// Pattern matched against `Name <email>`
    pub author: Option<String>,
    /// Only include commits at or after this instant
    pub since: Option<DateTime<Utc>>,
    /// Maximum number of commits to return
    pub limit: usize,
}

impl Default for CommitFilter {
    fn default() -> Self {
        Self {
            author: None,
            since: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl CommitFilter {
    /// Create a filter returning at most `n` commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            limit: n,
            ..Default::default()
        }
    }

    /// Filter by author name or email
    #[must_use]
    pub fn author(mut self, pattern: &str) -> Self {
        self.author = Some(pattern.to_string());
        self
    }

    /// Filter commits since an instant
    #[must_use]
    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    /// Build a filter from raw command-line values
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidFilter` if `since` cannot be parsed.
    pub fn from_args(
        author: Option<&str>,
        since: Option<&str>,
        limit: usize,
    ) -> Result<Self, GitError> {
        Ok(Self {
            author: author.map(ToString::to_string),
            since: since.map(parse_since).transpose()?,
            limit,
        })
    }

    /// Compile the author pattern, if any
    pub(crate) fn author_matcher(&self) -> Option<AuthorMatcher> {
        self.author.as_deref().map(AuthorMatcher::new)
    }
}

/// Author matching with git's `--author` semantics
///
/// The pattern is a regular expression tested against `Name <email>`.
/// Patterns that are not valid expressions are matched literally.
#[derive(Debug, Clone)]
pub struct AuthorMatcher {
    regex: Regex,
}

impl AuthorMatcher {
    /// Compile a pattern
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let regex = Regex::new(pattern).unwrap_or_else(|_| {
            Regex::new(&regex::escape(pattern)).expect("escaped pattern is a valid regex")
        });
        Self { regex }
    }

    /// Test a commit author
    #[must_use]
    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.regex.is_match(&format!("{name} <{email}>"))
    }
}

/// Parse a `since` value
///
/// Accepts `"<N>days"` (N days before now) or an ISO-8601 date/date-time.
/// Values without an offset are read in local time.
///
/// # Errors
///
/// Returns `GitError::InvalidFilter` for anything else.
pub fn parse_since(value: &str) -> Result<DateTime<Utc>, GitError> {
    parse_since_at(value, Utc::now())
}

/// Parse a `since` value relative to a fixed "now"
///
/// # Errors
///
/// Returns `GitError::InvalidFilter` if the value is not understood.
pub fn parse_since_at(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, GitError> {
    let trimmed = value.trim();
    let lowered = trimmed.to_lowercase();

    if let Some(count) = lowered.strip_suffix("days") {
        let days: u32 = count.trim().parse().map_err(|_| GitError::InvalidFilter {
            value: value.to_string(),
            reason: "expected a non-negative number of days, e.g. '7days'".to_string(),
        })?;
        return Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| GitError::InvalidFilter {
                value: value.to_string(),
                reason: "day count out of range".to_string(),
            });
    }

    parse_iso(trimmed).ok_or_else(|| GitError::InvalidFilter {
        value: value.to_string(),
        reason: "expected '<N>days' or an ISO-8601 date such as '2025-10-01'".to_string(),
    })
}

fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

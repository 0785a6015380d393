// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Interactive settings wizard

use std::path::Path;

use dialoguer::{Confirm, Input, Password};
use thiserror::Error;
use tracing::info;

use crate::settings::{Settings, SettingsError};

/// Wizard errors
#[derive(Debug, Error)]
pub enum InitError {
    /// Terminal interaction failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Settings could not be written
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Answers collected by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAnswers {
    /// Chat endpoint root
    pub base_url: String,
    /// Model name
    pub model: String,
    /// API key; empty keeps the current one
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Diff size limit in bytes
    pub max_diff_size: usize,
}

impl InitAnswers {
    /// Fold the answers into `current`
    #[must_use]
    pub fn apply(self, mut current: Settings) -> Settings {
        current.llm.base_url = self.base_url.trim().to_string();
        current.llm.model = self.model.trim().to_string();
        let key = self.api_key.trim();
        if !key.is_empty() {
            current.llm.api_key = Some(key.to_string());
        }
        current.llm.timeout_secs = self.timeout_secs;
        current.diff.max_diff_size = self.max_diff_size;
        current
    }
}

/// Whether the wizard wrote the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Settings were written
    Saved,
    /// The user declined to write
    Cancelled,
}

/// Ask for each setting, pre-filled with the current values
///
/// # Errors
///
/// Returns `InitError::Prompt` if the terminal interaction fails.
pub fn prompt_answers(current: &Settings) -> Result<InitAnswers, InitError> {
    let base_url: String = Input::new()
        .with_prompt("LLM base URL")
        .default(current.llm.base_url.clone())
        .interact_text()?;

    let model: String = Input::new()
        .with_prompt("Model")
        .default(current.llm.model.clone())
        .interact_text()?;

    let key_hint = if current.llm.api_key.is_some() {
        "API key (leave empty to keep the current key)"
    } else {
        "API key (optional, OPENAI_API_KEY is used when empty)"
    };
    let api_key = Password::new()
        .with_prompt(key_hint)
        .allow_empty_password(true)
        .interact()?;

    let timeout_secs: u64 = Input::new()
        .with_prompt("Request timeout (seconds)")
        .default(current.llm.timeout_secs)
        .interact_text()?;

    let max_diff_size: usize = Input::new()
        .with_prompt("Largest diff to summarize per file (bytes)")
        .default(current.diff.max_diff_size)
        .interact_text()?;

    Ok(InitAnswers {
        base_url,
        model,
        api_key,
        timeout_secs,
        max_diff_size,
    })
}

/// Run the wizard against the settings file at `path`
///
/// # Errors
///
/// Returns `InitError` if loading, prompting or saving fails.
pub fn run(path: &Path) -> Result<InitOutcome, InitError> {
    let current = Settings::load(path)?;
    let updated = prompt_answers(&current)?.apply(current);

    println!("\nSettings will be written to {}", path.display());
    let confirmed = Confirm::new()
        .with_prompt("Save these settings?")
        .default(true)
        .interact()?;
    if !confirmed {
        return Ok(InitOutcome::Cancelled);
    }

    updated.save(path)?;
    info!(path = %path.display(), "Settings saved");
    Ok(InitOutcome::Saved)
}

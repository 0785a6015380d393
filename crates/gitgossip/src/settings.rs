// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! User settings file
//!
//! Settings live in a TOML file, by default `gitgossip/config.toml` under the
//! platform config directory. Every field has a default, so a partial or
//! missing file is fine.
//!
//! ```toml
//! version = "1"
//!
//! [llm]
//! base_url = "http://localhost:11434/v1"
//! model = "llama3:8b"
//! timeout_secs = 60
//!
//! [diff]
//! max_diff_size = 50000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gitgossip_git::DiffSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Current settings file format
pub const SETTINGS_VERSION: &str = "1";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Settings file errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the file failed
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid settings TOML
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// The settings could not be rendered as TOML
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The platform has no configuration directory
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Everything gitgossip reads from its settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Chat-completion backend
    #[serde(default)]
    pub llm: LlmSettings,

    /// Diff extraction limits
    #[serde(default)]
    pub diff: DiffSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            llm: LlmSettings::default(),
            diff: DiffSettings::default(),
        }
    }
}

/// Connection details of the chat-completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token; `OPENAI_API_KEY` is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmSettings {
    /// Configured key, or the `OPENAI_API_KEY` environment variable
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Request timeout; zero falls back to the default
    #[must_use]
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(default_timeout_secs()),
            secs => Duration::from_secs(secs),
        }
    }
}

fn default_version() -> String {
    SETTINGS_VERSION.to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_model() -> String {
    gitgossip_llm::llm::DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Settings {
    /// Default settings file location
    ///
    /// - Linux: `~/.config/gitgossip/config.toml`
    /// - macOS: `~/Library/Application Support/gitgossip/config.toml`
    /// - Windows: `%APPDATA%\gitgossip\config.toml`
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoConfigDir` if the platform has none.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join("gitgossip").join("config.toml"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load settings, falling back to defaults when the file does not exist
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` if the file exists but cannot be read and
    /// `SettingsError::Parse` if it is not valid.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not valid settings.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Render settings as TOML text
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Serialize` if rendering fails.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write settings to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` on filesystem failures.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

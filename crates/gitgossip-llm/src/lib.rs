// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitgossip-llm: narration backends for gitgossip
//!
//! An [`Analyzer`] turns extracted commits into a changelog narrative and a
//! raw branch diff into a merge request title and description. Two backends
//! are provided:
//!
//! - [`LocalAnalyzer`] formats everything locally and never touches the network
//! - [`LlmAnalyzer`] prompts an OpenAI-compatible chat endpoint
//!
//! Backend failures never surface as errors; they come back as text tagged
//! with `[LLM ERROR]`.

#![warn(missing_docs)]

pub mod analyzer;
pub mod client;
pub mod error;
pub mod llm;
pub mod local;

pub use analyzer::{Analyzer, MergeRequestSummary, parse_mr_output};
pub use client::{ChatClient, ChatMessage, ChatRequest, HttpChatClient};
pub use error::LlmError;
pub use llm::LlmAnalyzer;
pub use local::LocalAnalyzer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analyzer::{Analyzer, MergeRequestSummary};
    pub use crate::llm::LlmAnalyzer;
    pub use crate::local::LocalAnalyzer;
}

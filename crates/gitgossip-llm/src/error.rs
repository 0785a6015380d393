// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitgossip-llm

use thiserror::Error;

/// Errors from a chat-completion backend
///
/// These never reach callers of [`crate::Analyzer`]; they are turned into
/// tagged result strings at that boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request could not be sent or the connection failed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The endpoint rejected the request for rate limiting
    #[error("Rate limited by the model endpoint")]
    RateLimited,

    /// The endpoint answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The response held no message content
    #[error("Empty response from model")]
    EmptyResponse,
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Network-backed analyzer

use gitgossip_git::Commit;
use tracing::{debug, error};

use crate::analyzer::{Analyzer, ERROR_TAG, MergeRequestSummary, parse_mr_output};
use crate::client::{ChatClient, ChatMessage, ChatRequest, HttpChatClient};

/// Default model name
pub const DEFAULT_MODEL: &str = "llama3:8b";

/// Sampling temperature for every request
pub const TEMPERATURE: f32 = 0.4;

/// Token cap for every request
pub const MAX_TOKENS: u32 = 500;

/// Characters of diff included in a merge request prompt
pub const MAX_PROMPT_DIFF_CHARS: usize = 8000;

const CHANGELOG_SYSTEM_PROMPT: &str = "You summarize git repository activity clearly and succinctly.";
const MR_SYSTEM_PROMPT: &str = "You generate professional Merge Request titles and descriptions.";

/// Analyzer that asks a chat model for the narrative
#[derive(Debug, Clone)]
pub struct LlmAnalyzer<C = HttpChatClient> {
    client: C,
    model: String,
}

impl<C: ChatClient> LlmAnalyzer<C> {
    /// Create an analyzer using `client` and `model`
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Model name sent with each request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, system: &str, user: String) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

impl<C: ChatClient> Analyzer for LlmAnalyzer<C> {
    fn analyze_commits(&self, commits: &[Commit]) -> String {
        if commits.is_empty() {
            return "No commits found.".to_string();
        }

        let listing = commit_listing(commits);
        debug!(commits = commits.len(), model = %self.model, "Requesting changelog");

        match self
            .client
            .complete(&self.request(CHANGELOG_SYSTEM_PROMPT, listing))
        {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "LLM request failed");
                format!("{ERROR_TAG} {e}")
            }
        }
    }

    fn generate_mr_summary(&self, diff_text: &str) -> MergeRequestSummary {
        if diff_text.trim().is_empty() {
            return MergeRequestSummary::no_changes();
        }

        let prompt = mr_prompt(diff_text);
        debug!(prompt_chars = prompt.len(), model = %self.model, "Requesting merge request summary");

        match self.client.complete(&self.request(MR_SYSTEM_PROMPT, prompt)) {
            Ok(text) => parse_mr_output(&text),
            Err(e) => {
                error!(error = %e, "LLM merge request call failed");
                MergeRequestSummary::new(ERROR_TAG, e.to_string())
            }
        }
    }
}

/// One `- <short> by <author>: <message> (+i/-d)` line per commit
#[must_use]
pub fn commit_listing(commits: &[Commit]) -> String {
    commits
        .iter()
        .map(|c| {
            format!(
                "- {} by {}: {} (+{}/-{})",
                c.short_hash(),
                c.author,
                c.message,
                c.insertions,
                c.deletions
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading `max_chars` characters of `text`, never splitting a character
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn mr_prompt(diff_text: &str) -> String {
    let diff = truncate_chars(diff_text, MAX_PROMPT_DIFF_CHARS);
    format!(
        "You are an expert software assistant generating concise and professional Merge Request
titles and descriptions from raw git diffs.

Below is the code diff between two branches:

{diff}

Instructions:
1. Create a short, action-oriented title (at most 10 words).
2. Write 3-6 bullet points describing what changed and why, in non-technical terms.
3. Avoid commit messages; infer meaning from code modifications.

Respond exactly in this format:

Title: <short title>
Description:
- <bullet 1>
- <bullet 2>
...
"
    )
}

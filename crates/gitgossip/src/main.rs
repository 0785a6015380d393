// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitgossip: human-friendly git summaries and merge request descriptions
//!
//! This binary reads commit history from one or more local repositories and
//! narrates it, either locally or through an OpenAI-compatible model.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use gitgossip::config::{Command, Config};
use gitgossip::init::{self, InitOutcome};
use gitgossip::output;
use gitgossip::service::{ServiceError, SummarizerService};
use gitgossip::settings::{LlmSettings, Settings};
use gitgossip_git::CommitFilter;
use gitgossip_llm::{Analyzer, HttpChatClient, LlmAnalyzer, LocalAnalyzer};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<ExitCode> {
    let Some(command) = &config.command else {
        Config::command().print_help()?;
        return Ok(ExitCode::from(2));
    };

    let settings_path = config.settings_path()?;

    match command {
        Command::Init => {
            match init::run(&settings_path)? {
                InitOutcome::Saved => println!("Settings saved to {}", settings_path.display()),
                InitOutcome::Cancelled => println!("Aborted, nothing written."),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Summarize {
            path,
            author,
            since,
            limit,
            json,
            use_mock,
            verbosity,
        } => {
            // Reject a bad filter before any repository is opened
            let filter = CommitFilter::from_args(author.as_deref(), since.as_deref(), *limit)?;
            let settings = Settings::load(&settings_path)?;
            let service = SummarizerService::new(settings.diff.clone());

            let report = match service.summarize_path(path, &filter) {
                Ok(report) => report,
                Err(e @ ServiceError::NoRepositories { .. }) => {
                    eprintln!("{e}");
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            };

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if *json {
                output::write_notices(&mut io::stderr(), &report)?;
                writeln!(out, "{}", output::commits_json(&report)?)?;
            } else {
                let analyzer = build_analyzer(*use_mock, *verbosity, &settings.llm)?;
                output::write_text(&mut out, &report, analyzer.as_ref())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::SummarizeMr {
            target_branch,
            path,
            pull,
            use_mock,
        } => {
            let settings = Settings::load(&settings_path)?;
            let service = SummarizerService::new(settings.diff.clone());
            let analyzer = build_analyzer(*use_mock, 1, &settings.llm)?;
            let summary = service
                .summarize_for_merge_request(path, target_branch, *pull, analyzer.as_ref())
                .with_context(|| {
                    format!("Failed to diff {} against {target_branch}", path.display())
                })?;
            output::write_merge_request(&mut io::stdout().lock(), &summary)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Digest => {
            println!("Coming soon... This feature is under development.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_analyzer(use_mock: bool, verbosity: u8, llm: &LlmSettings) -> Result<Box<dyn Analyzer>> {
    if use_mock {
        debug!(verbosity, "Using local analyzer");
        return Ok(Box::new(LocalAnalyzer::new(verbosity)));
    }
    debug!(base_url = %llm.base_url, model = %llm.model, "Using LLM analyzer");
    let client = HttpChatClient::new(&llm.base_url, llm.resolved_api_key(), llm.timeout())
        .context("Failed to build HTTP client")?;
    Ok(Box::new(LlmAnalyzer::new(client, &llm.model)))
}

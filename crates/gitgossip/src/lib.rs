// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitgossip library
//!
//! This module exports the command-line surface, settings, summarizer
//! service and presentation helpers of the `gitgossip` binary for use in
//! integration tests and as a library.

pub mod config;
pub mod init;
pub mod output;
pub mod service;
pub mod settings;

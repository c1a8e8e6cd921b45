// ABOUTME: Main library entry point for the Pierre training report pipeline
// ABOUTME: Turns a fitness-tracker export into a prompt and an LLM-written training report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Training Report
//!
//! A single-shot batch pipeline: load a Garmin-style export, summarize the
//! trailing week into a compact prompt, ask a language model for a training
//! report, and write the report to a dated markdown file.
//!
//! ## Architecture
//!
//! - **`pierre_core`**: errors, the tabular data model, export constants
//! - **`pierre_intelligence`**: the deterministic summarization engine
//! - **this crate**: configuration, logging, loaders, the model provider,
//!   the report writer, and the pipeline wiring them together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_training_report::config::ReportConfig;
//! use pierre_training_report::pipeline::{run, RunOptions};
//! use pierre_core::errors::AppResult;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> AppResult<()> {
//!     let config = ReportConfig::from_env()?;
//!     let outcome = run(&config, RunOptions::default()).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

/// Run configuration from environment and command line
pub mod config;

/// Structured logging setup
pub mod logging;

/// Export loaders producing the dataset store
pub mod loader;

/// Trainer persona and athlete profile
pub mod skill;

/// Language model providers
pub mod llm;

/// Report persistence
pub mod report;

/// End-to-end run orchestration
pub mod pipeline;

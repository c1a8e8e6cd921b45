// ABOUTME: Training-data summarization engine turning an export into an LLM prompt
// ABOUTME: Trailing windows, duration reconciliation, weekly log, climbing and recovery analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Deterministic, read-only transformations from a loaded [`DataStore`] to the
//! text handed to the report model. Every component reads the same immutable
//! store; none of them fail; absent datasets degrade to "unavailable" output.
//!
//! ## Modules
//!
//! - **window**: the trailing seven-day window and most-recent-N selection
//! - **duration**: duration formatting shared by every section
//! - **reconciler**: climbing session durations from route and problem records
//! - **narrator**: one line per day of the trailing week
//! - **climbing**: grade, completion, attempts, and time per climbing discipline
//! - **recovery**: HRV, sleep, readiness, daily stats, and VO2 max aggregation
//! - **assembler**: the final prompt in a fixed section order
//!
//! [`DataStore`]: pierre_core::models::DataStore

/// Trailing window and chronological selection
pub mod window;

/// Duration formatting
pub mod duration;

/// Climbing duration reconciliation
pub mod reconciler;

/// Weekly activity narrator
pub mod narrator;

/// Climbing and bouldering discipline analyzer
pub mod climbing;

/// Recovery and readiness aggregator
pub mod recovery;

/// Prompt assembler
pub mod assembler;

pub use assembler::assemble_prompt;
pub use climbing::analyze_climbing;
pub use duration::format_duration;
pub use narrator::narrate;
pub use reconciler::reconcile;
pub use recovery::{aggregate, RecoveryMetrics};
pub use window::TrailingWindow;

// ABOUTME: Core types and constants for the Pierre training report pipeline
// ABOUTME: Foundation crate with error handling, the tabular data model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre training
//! report pipeline. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the run-level taxonomy
//! - **constants**: Dataset names, field names, and activity vocabularies of the export format
//! - **models**: Column-typed tables, the dataset store, and typed record views

/// Unified error handling system with standard error codes and exit statuses
pub mod errors;

/// Export-format constants organized by domain
pub mod constants;

/// Tabular data model and typed record views
pub mod models;

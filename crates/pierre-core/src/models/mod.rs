// ABOUTME: Tabular data model for fitness-tracker exports and typed record views
// ABOUTME: Re-exports cells, columns, tables, the dataset store, and per-dataset records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! An export is loaded once into a [`DataStore`]: a mapping from dataset name to
//! [`Table`]. Every column of a table has a single explicit type, decided once
//! at load time, so a numeric column never silently mixes in text.
//!
//! Consumers do not read tables cell by cell. Each dataset has a typed record
//! view (`ActivityRecord`, `SleepRecord`, ...) whose fields are all optional,
//! leaving every aggregation to state its own missing-value policy.

mod records;
mod table;
mod timestamp;
mod value;

pub use records::{
    ActivityRecord, ClimbingDetailRecord, DailyStatsRecord, SleepRecord, Timestamped,
    TrainingReadinessRecord, Vo2MaxRecord,
};
pub use table::{Column, ColumnKind, DataStore, Table};
pub use timestamp::{parse_timestamp, timestamp_from_epoch};
pub use value::{format_number, ActivityId, CellValue};

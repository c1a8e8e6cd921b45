// ABOUTME: Tabular store loader building the dataset store from an export on disk
// ABOUTME: Detects markdown, CSV directory, or zip exports and normalizes the time column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tabular Store Loader
//!
//! Produces the read-only [`DataStore`] consumed by the summarization engine.
//! Three export layouts are supported:
//!
//! - a markdown document with one pipe table per `## ` section
//! - a directory of per-dataset `*.csv` files
//! - a zip archive of per-dataset `*.csv` files
//!
//! Column types are decided once per column while loading. Afterwards the
//! `time` column of every dataset is coerced to UTC timestamps, the only
//! mutation the store ever sees.

mod delimited;
mod markdown;

pub use delimited::{load_directory, load_zip, read_csv};
pub use markdown::{dataset_key, parse_markdown_tables, split_row};

use std::fs;
use std::path::{Path, PathBuf};

use pierre_core::constants::fields;
use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::{DataStore, Table};
use tracing::{info, warn};

/// Layout of an export on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Markdown document with pipe tables
    Markdown(PathBuf),
    /// Directory of CSV files
    CsvDirectory(PathBuf),
    /// Zip archive of CSV files
    ZipArchive(PathBuf),
}

impl DataSource {
    /// Detect the layout from the path: directories hold CSV files, `.zip`
    /// files are archives, anything else is read as markdown
    ///
    /// # Errors
    ///
    /// Returns an input-not-found error if nothing exists at `path`
    pub fn detect(path: &Path) -> AppResult<Self> {
        if path.is_dir() {
            return Ok(Self::CsvDirectory(path.to_path_buf()));
        }
        if !path.exists() {
            return Err(AppError::input_not_found("Summary file", path.display()));
        }
        let is_zip = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        Ok(if is_zip {
            Self::ZipArchive(path.to_path_buf())
        } else {
            Self::Markdown(path.to_path_buf())
        })
    }

    fn read_datasets(&self) -> AppResult<Vec<(String, Table)>> {
        match self {
            Self::Markdown(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    AppError::input_unreadable(format!("Failed to read {}: {e}", path.display()))
                })?;
                Ok(parse_markdown_tables(&content))
            }
            Self::CsvDirectory(dir) => load_directory(dir),
            Self::ZipArchive(path) => load_zip(path),
        }
    }

    /// Load every dataset and normalize timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be read at all; individual
    /// malformed datasets are skipped with a warning instead
    pub fn load(&self) -> AppResult<DataStore> {
        let mut store = DataStore::new();
        for (name, table) in self.read_datasets()? {
            info!(dataset = %name, rows = table.row_count(), "Loaded dataset");
            store.insert(&name, table);
        }

        let failed = store.normalize_timestamps(fields::TIME);
        if failed > 0 {
            warn!(failed, "Some timestamps could not be parsed");
        }
        info!(datasets = store.len(), "Loaded data tables");
        Ok(store)
    }
}

/// Detect the export layout at `path` and load it
///
/// # Errors
///
/// Returns an error if nothing exists at `path` or it cannot be read
pub fn load_store(path: &Path) -> AppResult<DataStore> {
    DataSource::detect(path)?.load()
}

/// Build a store from a markdown document already in memory
#[must_use]
pub fn store_from_markdown(content: &str) -> DataStore {
    let mut store = DataStore::new();
    for (name, table) in parse_markdown_tables(content) {
        store.insert(&name, table);
    }
    store.normalize_timestamps(fields::TIME);
    store
}

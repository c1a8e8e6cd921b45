// ABOUTME: Readers for per-dataset CSV exports, from a directory or a zip archive
// ABOUTME: Each file stem names a dataset; unreadable files are skipped with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use pierre_core::errors::{AppError, AppResult};
use pierre_core::models::Table;
use tracing::{debug, warn};

const CSV_EXTENSION: &str = "csv";

/// Read one CSV document into a table
///
/// The first record is the header; rows may be shorter or longer than it.
///
/// # Errors
///
/// Returns an invalid-format error if the document is not valid CSV
pub fn read_csv<R: Read>(reader: R) -> AppResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| AppError::invalid_format(format!("Invalid CSV header: {e}")))?
        .iter()
        .map(str::to_owned)
        .collect();

    let rows = csv_reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(str::to_owned).collect::<Vec<_>>())
                .map_err(|e| AppError::invalid_format(format!("Invalid CSV record: {e}")))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Table::from_rows(&headers, &rows))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

fn dataset_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
}

/// Load every `*.csv` file of a directory, keyed by file stem
///
/// # Errors
///
/// Returns an input error if the directory cannot be listed
pub fn load_directory(dir: &Path) -> AppResult<Vec<(String, Table)>> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .map_err(|e| AppError::input_unreadable(format!("Failed to list {}: {e}", dir.display())))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_csv(path))
        .collect();
    paths.sort();

    let mut datasets = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = dataset_name(&path) else {
            continue;
        };
        let table = File::open(&path)
            .map_err(AppError::from)
            .and_then(read_csv);
        match table {
            Ok(table) => {
                debug!(dataset = %name, rows = table.row_count(), "Loaded CSV file");
                datasets.push((name, table));
            }
            Err(e) => warn!(file = %path.display(), error = %e, "Skipping unreadable CSV file"),
        }
    }
    Ok(datasets)
}

/// Load every `*.csv` member of a zip archive, keyed by file stem
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or is not a zip file
pub fn load_zip(path: &Path) -> AppResult<Vec<(String, Table)>> {
    let file = File::open(path)
        .map_err(|e| AppError::input_unreadable(format!("Failed to open {}: {e}", path.display())))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        AppError::invalid_format(format!("Invalid zip archive {}: {e}", path.display()))
    })?;

    let mut datasets = Vec::new();
    for index in 0..archive.len() {
        let member = match archive.by_index(index) {
            Ok(member) => member,
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable archive member");
                continue;
            }
        };
        if member.is_dir() {
            continue;
        }
        let member_path = Path::new(member.name()).to_path_buf();
        if !is_csv(&member_path) {
            continue;
        }
        let Some(name) = dataset_name(&member_path) else {
            continue;
        };
        match read_csv(member) {
            Ok(table) => {
                debug!(dataset = %name, rows = table.row_count(), "Loaded archive member");
                datasets.push((name, table));
            }
            Err(e) => warn!(
                member = %member_path.display(),
                error = %e,
                "Skipping unreadable archive member"
            ),
        }
    }
    Ok(datasets)
}

// ABOUTME: Report writer persisting the generated analysis as a dated markdown file
// ABOUTME: Creates the output directory when needed; write failures are output errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pierre_core::errors::{AppError, AppResult};
use tracing::info;

/// File name of the report for `date`: `training_analysis_YYYY-MM-DD.md`
#[must_use]
pub fn report_file_name(date: NaiveDate) -> String {
    format!("training_analysis_{}.md", date.format("%Y-%m-%d"))
}

/// Report document: a dated title followed by the completion verbatim
#[must_use]
pub fn render_report(content: &str, date: NaiveDate) -> String {
    format!(
        "# Training Analysis - {}\n\n{content}",
        date.format("%A, %B %d, %Y")
    )
}

/// Write the report into `output_dir`, replacing any report of the same day
///
/// # Errors
///
/// Returns a storage error if the directory cannot be created or the file written
pub fn write_report(output_dir: &Path, content: &str, date: NaiveDate) -> AppResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| {
        AppError::storage(format!(
            "Failed to create output directory {}: {e}",
            output_dir.display()
        ))
    })?;

    let path = output_dir.join(report_file_name(date));
    fs::write(&path, render_report(content, date)).map_err(|e| {
        AppError::storage(format!("Failed to write report {}: {e}", path.display()))
    })?;

    info!(path = %path.display(), "Report saved");
    Ok(path)
}

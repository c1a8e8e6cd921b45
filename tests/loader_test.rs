// ABOUTME: Integration tests for export loading from markdown, CSV directories, and zip archives
// ABOUTME: Covers layout detection, skipped sections, column coercion, and timestamp normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]

mod common;

use std::fs;
use std::io::Write;

use chrono::{TimeZone, Utc};
use pierre_core::constants::{datasets, fields};
use pierre_core::errors::ErrorCode;
use pierre_core::models::{ActivityRecord, CellValue, Column, ColumnKind};
use pierre_training_report::loader::{load_store, parse_markdown_tables, DataSource};
use tempfile::TempDir;

const ACTIVITY_CSV: &str = "\
ActivityID,time,activityType,movingDuration,averageHR,maxHR
1,1741075200000,running,1800,150,172
2,1741284000,indoor_climbing,,,
";

const ROUTES_CSV: &str = "\
ActivityID,Duration,climbingGrade,resultType
2,600,6a,completed
";

#[test]
fn test_markdown_export_loads_every_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garmin_export.md");
    fs::write(&path, common::full_export()).unwrap();

    assert_eq!(DataSource::detect(&path).unwrap(), DataSource::Markdown(path.clone()));
    let store = load_store(&path).unwrap();
    for name in [
        datasets::ACTIVITY_SUMMARY,
        datasets::CLIMBING_ROUTES,
        datasets::BOULDER_PROBLEMS,
        datasets::SLEEP_SUMMARY,
        datasets::DAILY_STATS,
        datasets::TRAINING_READINESS,
        datasets::VO2_MAX,
    ] {
        assert!(store.dataset(name).is_some(), "missing {name}");
    }

    let activities = store.dataset(datasets::ACTIVITY_SUMMARY).unwrap();
    assert_eq!(activities.row_count(), 7);
    assert_eq!(
        activities.column(fields::TIME).map(Column::kind),
        Some(ColumnKind::Timestamp)
    );
}

#[test]
fn test_markdown_skips_sections_without_data() {
    let tables = parse_markdown_tables(
        "## Activity Summary\n\nNo data available\n\n| a |\n|---|\n| 1 |\n\
\n## Sleep Summary\n\nNothing recorded this week.\n\
\n## Daily Stats\n\n| totalSteps |\n|---|\n\
\n## Training Readiness\n\n| score | level |\n|---|---|\n| 64 | LOW |\n",
    );
    let names: Vec<&str> = tables.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["TrainingReadiness"]);
}

#[test]
fn test_markdown_keeps_text_columns_with_mixed_values() {
    let tables = parse_markdown_tables(
        "## Training Readiness\n\n| score | level |\n|---|---|\n| 64 | LOW |\n| n/a | HIGH |\n",
    );
    let (_, table) = &tables[0];
    assert_eq!(
        table.value(1, fields::SCORE),
        Some(CellValue::Text("n/a".to_owned()))
    );
    assert_eq!(table.number(0, fields::SCORE), None);
}

#[test]
fn test_csv_directory_loads_each_file_as_dataset() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ActivitySummary.csv"), ACTIVITY_CSV).unwrap();
    fs::write(dir.path().join("ClimbingRoutes.csv"), ROUTES_CSV).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a dataset").unwrap();

    assert_eq!(
        DataSource::detect(dir.path()).unwrap(),
        DataSource::CsvDirectory(dir.path().to_path_buf())
    );
    let store = load_store(dir.path()).unwrap();
    assert_eq!(store.len(), 2);

    let records = ActivityRecord::all(store.dataset(datasets::ACTIVITY_SUMMARY).unwrap());
    // epoch milliseconds and seconds both normalize
    assert_eq!(
        records[0].time,
        Utc.with_ymd_and_hms(2025, 3, 4, 8, 0, 0).single()
    );
    assert_eq!(
        records[1].time,
        Utc.with_ymd_and_hms(2025, 3, 6, 18, 0, 0).single()
    );
    assert_eq!(records[1].moving_duration, None);
    assert_eq!(records[1].activity_type.as_deref(), Some("indoor_climbing"));
}

#[test]
fn test_zip_archive_loads_csv_members() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.zip");
    {
        let file = fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("export/ActivitySummary.csv", options).unwrap();
        zip.write_all(ACTIVITY_CSV.as_bytes()).unwrap();
        zip.start_file("export/README.md", options).unwrap();
        zip.write_all(b"# readme").unwrap();
        zip.start_file("export/VO2_Max.csv", options).unwrap();
        zip.write_all(b"time,vo2MaxValue\n2025-03-01,52\n").unwrap();
        zip.finish().unwrap();
    }

    assert_eq!(DataSource::detect(&path).unwrap(), DataSource::ZipArchive(path.clone()));
    let store = load_store(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.dataset(datasets::ACTIVITY_SUMMARY).is_some());
    assert!(store.dataset(datasets::VO2_MAX).is_some());
}

#[test]
fn test_invalid_zip_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.zip");
    fs::write(&path, "definitely not a zip").unwrap();

    let error = load_store(&path).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_unreadable_markdown_export_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.md");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let error = load_store(&path).unwrap_err();
    assert_eq!(error.code, ErrorCode::InputUnreadable);
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_missing_export_is_input_not_found() {
    let dir = TempDir::new().unwrap();
    let error = load_store(&dir.path().join("missing.md")).unwrap_err();
    assert_eq!(error.code, ErrorCode::InputNotFound);
    assert_eq!(error.exit_code(), 2);
}

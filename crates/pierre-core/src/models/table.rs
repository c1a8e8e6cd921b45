// ABOUTME: Column-typed tables and the dataset store built once per run
// ABOUTME: Explicit, total per-column coercion and one-time timestamp normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::timestamp::{parse_timestamp, timestamp_from_epoch};
use super::value::CellValue;
use crate::constants::datasets;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every present cell is a number
    Number,
    /// Cells are kept as text
    Text,
    /// Every present cell is a UTC timestamp
    Timestamp,
}

/// A single column with one storage type for all of its cells
///
/// `None` marks a missing cell. The type is decided for the whole column, never per cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric column
    Number(Vec<Option<f64>>),
    /// Textual column
    Text(Vec<Option<String>>),
    /// Timestamp column
    Timestamp(Vec<Option<DateTime<Utc>>>),
}

impl Column {
    /// Build a column from raw cell text
    ///
    /// Empty cells are missing. The column is numeric only when every present
    /// cell parses as a number; otherwise every cell keeps its original text.
    #[must_use]
    pub fn from_raw<S: AsRef<str>>(cells: &[S]) -> Self {
        let trimmed: Vec<Option<&str>> = cells
            .iter()
            .map(|cell| {
                let cell = cell.as_ref().trim();
                (!cell.is_empty()).then_some(cell)
            })
            .collect();

        let has_values = trimmed.iter().any(Option::is_some);
        let parsed: Option<Vec<Option<f64>>> = trimmed
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(text) => text
                    .parse::<f64>()
                    .ok()
                    .map(|value| (!value.is_nan()).then_some(value)),
            })
            .collect();

        match parsed {
            Some(numbers) if has_values => Self::Number(numbers),
            _ => Self::Text(
                trimmed
                    .into_iter()
                    .map(|cell| cell.map(str::to_owned))
                    .collect(),
            ),
        }
    }

    /// Storage type of this column
    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Number(_) => ColumnKind::Number,
            Self::Text(_) => ColumnKind::Text,
            Self::Timestamp(_) => ColumnKind::Timestamp,
        }
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Number(cells) => cells.len(),
            Self::Text(cells) => cells.len(),
            Self::Timestamp(cells) => cells.len(),
        }
    }

    /// Whether the column has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `row`, `None` when missing or out of range
    #[must_use]
    pub fn get(&self, row: usize) -> Option<CellValue> {
        match self {
            Self::Number(cells) => cells.get(row).copied().flatten().map(CellValue::Number),
            Self::Text(cells) => cells.get(row).cloned().flatten().map(CellValue::Text),
            Self::Timestamp(cells) => cells
                .get(row)
                .copied()
                .flatten()
                .map(CellValue::Timestamp),
        }
    }

    /// Numeric cell at `row`; text and timestamp columns never yield numbers
    #[must_use]
    pub fn number(&self, row: usize) -> Option<f64> {
        match self {
            Self::Number(cells) => cells.get(row).copied().flatten(),
            _ => None,
        }
    }

    /// Timestamp cell at `row`
    #[must_use]
    pub fn timestamp(&self, row: usize) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(cells) => cells.get(row).copied().flatten(),
            _ => None,
        }
    }

    /// Convert this column to timestamps
    ///
    /// Text cells are parsed, numeric cells are read as Unix epochs. Returns the
    /// new column and the number of present cells that could not be converted.
    #[must_use]
    pub fn to_timestamps(&self) -> (Self, usize) {
        let mut failed = 0;
        let mut convert = |present: bool, parsed: Option<DateTime<Utc>>| {
            if present && parsed.is_none() {
                failed += 1;
            }
            parsed
        };

        let cells: Vec<Option<DateTime<Utc>>> = match self {
            Self::Timestamp(_) => return (self.clone(), 0),
            Self::Text(cells) => cells
                .iter()
                .map(|cell| {
                    convert(
                        cell.is_some(),
                        cell.as_deref().and_then(parse_timestamp),
                    )
                })
                .collect(),
            Self::Number(cells) => cells
                .iter()
                .map(|cell| convert(cell.is_some(), cell.and_then(timestamp_from_epoch)))
                .collect(),
        };

        (Self::Timestamp(cells), failed)
    }
}

/// A named set of equally long columns
///
/// The trimmed source text of every cell is kept next to the typed columns, so
/// labels that happen to look numeric (`5.10` next to `5.1`) stay distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, Column)>,
    source: Vec<Vec<Option<String>>>,
    row_count: usize,
}

impl Table {
    /// Build a table from a header row and raw data rows
    ///
    /// Short rows are padded with missing cells; cells beyond the header width are dropped.
    #[must_use]
    pub fn from_rows(headers: &[String], rows: &[Vec<String>]) -> Self {
        let mut columns = Vec::with_capacity(headers.len());
        let mut source = Vec::with_capacity(headers.len());
        for (index, name) in headers.iter().enumerate() {
            let cells: Vec<&str> = rows
                .iter()
                .map(|row| row.get(index).map_or("", |cell| cell.trim()))
                .collect();
            columns.push((name.trim().to_owned(), Column::from_raw(&cells)));
            source.push(
                cells
                    .iter()
                    .map(|cell| (!cell.is_empty()).then(|| (*cell).to_owned()))
                    .collect(),
            );
        }

        Self {
            columns,
            source,
            row_count: rows.len(),
        }
    }

    /// Number of records
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Whether the table has no records
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Column names in export order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Column by name (first match)
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(column_name, _)| column_name == name)
            .map(|(_, column)| column)
    }

    /// Whether a column exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cell value by row and column name
    #[must_use]
    pub fn value(&self, row: usize, name: &str) -> Option<CellValue> {
        self.column(name).and_then(|column| column.get(row))
    }

    /// Numeric cell by row and column name
    #[must_use]
    pub fn number(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name).and_then(|column| column.number(row))
    }

    /// Cell rendered as text by row and column name
    #[must_use]
    pub fn text(&self, row: usize, name: &str) -> Option<String> {
        self.value(row, name).map(|value| value.to_string())
    }

    /// Cell exactly as it appeared in the export, whatever the column type
    #[must_use]
    pub fn source_text(&self, row: usize, name: &str) -> Option<String> {
        self.columns
            .iter()
            .position(|(column_name, _)| column_name == name)
            .and_then(|index| self.source.get(index))
            .and_then(|cells| cells.get(row).cloned().flatten())
    }

    /// Timestamp cell by row and column name
    #[must_use]
    pub fn timestamp(&self, row: usize, name: &str) -> Option<DateTime<Utc>> {
        self.column(name).and_then(|column| column.timestamp(row))
    }

    /// Coerce the named column to timestamps in place
    ///
    /// Returns the number of present cells that could not be parsed; those become missing.
    pub fn normalize_timestamps(&mut self, name: &str) -> usize {
        let Some((_, column)) = self
            .columns
            .iter_mut()
            .find(|(column_name, _)| column_name == name)
        else {
            return 0;
        };
        let (converted, failed) = column.to_timestamps();
        *column = converted;
        failed
    }
}

/// All datasets of one export, keyed by dataset name
///
/// Built once by the loader and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    tables: BTreeMap<String, Table>,
}

impl DataStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical dataset name for a possibly aliased one
    #[must_use]
    pub fn canonical_name(name: &str) -> &str {
        datasets::ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name, |(_, canonical)| canonical)
    }

    /// Add a dataset, replacing any earlier one with the same canonical name
    pub fn insert(&mut self, name: &str, table: Table) {
        let canonical = Self::canonical_name(name).to_owned();
        if self.tables.contains_key(&canonical) {
            warn!(dataset = %canonical, "Duplicate dataset replaces earlier one");
        }
        self.tables.insert(canonical, table);
    }

    /// Dataset by name, `None` when absent or empty
    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&Table> {
        self.tables
            .get(Self::canonical_name(name))
            .filter(|table| !table.is_empty())
    }

    /// Dataset names present in the store
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of datasets
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the store holds no datasets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Coerce the named column of every dataset to timestamps
    ///
    /// Returns the total number of cells that could not be parsed.
    pub fn normalize_timestamps(&mut self, column: &str) -> usize {
        let mut total_failed = 0;
        for (name, table) in &mut self.tables {
            let failed = table.normalize_timestamps(column);
            if failed > 0 {
                warn!(
                    dataset = %name,
                    column,
                    failed,
                    "Unparseable timestamps treated as missing"
                );
            } else {
                debug!(dataset = %name, column, "Timestamps normalized");
            }
            total_failed += failed;
        }
        total_failed
    }
}

// ABOUTME: Single-cell values and activity identifiers
// ABOUTME: Display rules shared by every narrative that prints raw export values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest magnitude printed as an integer without a fractional part
const MAX_INTEGRAL_DISPLAY: f64 = 1e15;

/// A single non-missing cell of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric cell
    Number(f64),
    /// Textual cell
    Text(String),
    /// Timestamp cell (only the normalized time column)
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Numeric value, if this is a number
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Timestamp value, if this is a timestamp
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(value) => f.write_str(value),
            Self::Timestamp(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Format a number the way it reads in a report: whole numbers without a fraction
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract().abs() < f64::EPSILON && value.abs() < MAX_INTEGRAL_DISPLAY {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Identifier joining an activity to its climbing detail records
///
/// Identifiers may load as numbers or text depending on the export; both
/// normalize to the same textual key so `12345` and `"12345"` match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(String);

impl ActivityId {
    /// Create an identifier from its textual form
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_owned())
    }

    /// Normalize a cell into an identifier
    #[must_use]
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        let key = cell.to_string();
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_owned()))
        }
    }

    /// Textual form of the identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ActivityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_drops_integral_fraction() {
        assert_eq!(format_number(82.0), "82");
        assert_eq!(format_number(5.1), "5.1");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn test_numeric_and_textual_ids_match() {
        let numeric = ActivityId::from_cell(&CellValue::Number(12345.0));
        let textual = ActivityId::from_cell(&CellValue::Text("12345".to_owned()));
        assert_eq!(numeric, textual);
        assert_eq!(numeric, Some(ActivityId::from(12345)));
    }
}

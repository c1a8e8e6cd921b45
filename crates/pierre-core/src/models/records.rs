// ABOUTME: Typed, explicitly optional record views over the export datasets
// ABOUTME: Activity, climbing detail, sleep, daily stats, readiness, and VO2 max rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::table::Table;
use super::value::{ActivityId, CellValue};
use crate::constants::fields;

/// Records that carry the normalized timestamp
pub trait Timestamped {
    /// Timestamp of the record, if present
    fn time(&self) -> Option<DateTime<Utc>>;
}

/// One row of `ActivitySummary`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityRecord {
    /// Activity identifier
    pub activity_id: Option<ActivityId>,
    /// Start time
    pub time: Option<DateTime<Utc>>,
    /// Activity type (e.g. `running`, `indoor_climbing`)
    pub activity_type: Option<String>,
    /// User-facing name
    pub activity_name: Option<String>,
    /// Moving time in seconds
    pub moving_duration: Option<f64>,
    /// Wall-clock time in seconds
    pub elapsed_duration: Option<f64>,
    /// Average heart rate in bpm
    pub average_hr: Option<f64>,
    /// Maximum heart rate in bpm
    pub max_hr: Option<f64>,
}

impl ActivityRecord {
    /// Read the record at `row`
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Self {
        Self {
            activity_id: table
                .value(row, fields::ACTIVITY_ID)
                .and_then(|cell| ActivityId::from_cell(&cell)),
            time: table.timestamp(row, fields::TIME),
            activity_type: table.text(row, fields::ACTIVITY_TYPE),
            activity_name: table.text(row, fields::ACTIVITY_NAME),
            moving_duration: table.number(row, fields::MOVING_DURATION),
            elapsed_duration: table.number(row, fields::ELAPSED_DURATION),
            average_hr: table.number(row, fields::AVERAGE_HR),
            max_hr: table.number(row, fields::MAX_HR),
        }
    }

    /// Read every record in table order
    #[must_use]
    pub fn all(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .map(|row| Self::from_row(table, row))
            .collect()
    }
}

impl Timestamped for ActivityRecord {
    fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }
}

/// One row of `ClimbingRoutes` or `BoulderProblems`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClimbingDetailRecord {
    /// Activity this route or problem belongs to
    pub activity_id: Option<ActivityId>,
    /// Time on the route or problem in seconds
    pub duration: Option<f64>,
    /// Grade, rendered as it appears in the export
    pub grade: Option<String>,
    /// Outcome (e.g. `completed`, `Sent`, `topped`)
    pub result_type: Option<String>,
    /// Number of attempts
    pub attempt_count: Option<f64>,
}

impl ClimbingDetailRecord {
    /// Read the record at `row`, taking the grade from `grade_field`
    #[must_use]
    pub fn from_row(table: &Table, row: usize, grade_field: &str) -> Self {
        Self {
            activity_id: table
                .value(row, fields::ACTIVITY_ID)
                .and_then(|cell| ActivityId::from_cell(&cell)),
            duration: table.number(row, fields::DURATION),
            grade: table.source_text(row, grade_field),
            result_type: table.text(row, fields::RESULT_TYPE),
            attempt_count: table.number(row, fields::ATTEMPT_COUNT),
        }
    }

    /// Read every record in table order
    #[must_use]
    pub fn all(table: &Table, grade_field: &str) -> Vec<Self> {
        (0..table.row_count())
            .map(|row| Self::from_row(table, row, grade_field))
            .collect()
    }
}

/// One row of `SleepSummary`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SleepRecord {
    /// Night of the record
    pub time: Option<DateTime<Utc>>,
    /// Average overnight HRV in milliseconds
    pub avg_overnight_hrv: Option<f64>,
    /// Time asleep in seconds
    pub sleep_time_seconds: Option<f64>,
    /// Sleep score as exported
    pub sleep_score: Option<CellValue>,
}

impl SleepRecord {
    /// Read the record at `row`
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Self {
        Self {
            time: table.timestamp(row, fields::TIME),
            avg_overnight_hrv: table.number(row, fields::AVG_OVERNIGHT_HRV),
            sleep_time_seconds: table.number(row, fields::SLEEP_TIME_SECONDS),
            sleep_score: table.value(row, fields::SLEEP_SCORE),
        }
    }

    /// Read every record in table order
    #[must_use]
    pub fn all(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .map(|row| Self::from_row(table, row))
            .collect()
    }
}

impl Timestamped for SleepRecord {
    fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }
}

/// One row of `DailyStats`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyStatsRecord {
    /// Day of the record
    pub time: Option<DateTime<Utc>>,
    /// Steps
    pub total_steps: Option<f64>,
    /// Resting heart rate in bpm
    pub resting_heart_rate: Option<f64>,
    /// Time under stress in seconds
    pub stress_duration: Option<f64>,
}

impl DailyStatsRecord {
    /// Read the record at `row`
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Self {
        Self {
            time: table.timestamp(row, fields::TIME),
            total_steps: table.number(row, fields::TOTAL_STEPS),
            resting_heart_rate: table.number(row, fields::RESTING_HEART_RATE),
            stress_duration: table.number(row, fields::STRESS_DURATION),
        }
    }

    /// Read every record in table order
    #[must_use]
    pub fn all(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .map(|row| Self::from_row(table, row))
            .collect()
    }
}

impl Timestamped for DailyStatsRecord {
    fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }
}

/// One row of `TrainingReadiness`; values are surfaced verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingReadinessRecord {
    /// Day of the record
    pub time: Option<DateTime<Utc>>,
    /// Readiness score
    pub score: Option<CellValue>,
    /// Readiness level (e.g. `HIGH`)
    pub level: Option<CellValue>,
    /// Acute training load
    pub acute_load: Option<CellValue>,
}

impl TrainingReadinessRecord {
    /// Read the record at `row`
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Self {
        Self {
            time: table.timestamp(row, fields::TIME),
            score: table.value(row, fields::SCORE),
            level: table.value(row, fields::LEVEL),
            acute_load: table.value(row, fields::ACUTE_LOAD),
        }
    }

    /// Read every record in table order
    #[must_use]
    pub fn all(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .map(|row| Self::from_row(table, row))
            .collect()
    }
}

impl Timestamped for TrainingReadinessRecord {
    fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }
}

/// One row of `VO2Max`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vo2MaxRecord {
    /// Day of the reading
    pub time: Option<DateTime<Utc>>,
    /// VO2 max in ml/kg/min
    pub vo2_max_value: Option<f64>,
}

impl Vo2MaxRecord {
    /// Read the record at `row`
    #[must_use]
    pub fn from_row(table: &Table, row: usize) -> Self {
        Self {
            time: table.timestamp(row, fields::TIME),
            vo2_max_value: table.number(row, fields::VO2_MAX_VALUE),
        }
    }

    /// Read every record in table order
    #[must_use]
    pub fn all(table: &Table) -> Vec<Self> {
        (0..table.row_count())
            .map(|row| Self::from_row(table, row))
            .collect()
    }
}

impl Timestamped for Vo2MaxRecord {
    fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }
}

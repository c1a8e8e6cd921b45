// ABOUTME: Recovery and readiness aggregator over sleep, daily stats, readiness, and VO2 max
// ABOUTME: Trailing-window means and latest values, each with its own missing-value policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)] // Safe: small physiological values

use pierre_core::constants::{datasets, fields, windows, UNAVAILABLE};
use pierre_core::models::{
    format_number, CellValue, DailyStatsRecord, DataStore, SleepRecord, Table,
    TrainingReadinessRecord, Vo2MaxRecord,
};
use serde::Serialize;
use tracing::debug;

use crate::window::{chronological, most_recent};

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Overnight heart-rate variability over the last seven nights that have a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HrvSummary {
    /// Mean in milliseconds
    pub average_ms: f64,
    /// Most recent value in milliseconds
    pub latest_ms: f64,
}

/// Most recent training readiness record, values as exported
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadinessSnapshot {
    /// Readiness score
    pub score: Option<CellValue>,
    /// Readiness level
    pub level: Option<CellValue>,
    /// Acute training load
    pub acute_load: Option<CellValue>,
}

/// Sleep over the last seven records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SleepSummary {
    /// Mean time asleep in hours
    pub average_hours: Option<f64>,
    /// Mean numeric sleep score
    pub average_score: Option<f64>,
    /// Sleep score of the most recent record
    pub latest_score: Option<CellValue>,
}

/// Daily totals over the last seven records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailySummary {
    /// Mean steps
    pub average_steps: Option<f64>,
    /// Mean resting heart rate in bpm
    pub average_resting_hr: Option<f64>,
    /// Mean stress in minutes
    pub average_stress_minutes: Option<f64>,
}

impl DailySummary {
    /// Whether every metric is unavailable
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.average_steps.is_none()
            && self.average_resting_hr.is_none()
            && self.average_stress_minutes.is_none()
    }
}

/// Everything the recovery sections of the prompt need
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecoveryMetrics {
    /// `None` when no night has an HRV value
    pub hrv: Option<HrvSummary>,
    /// `None` when the readiness dataset is absent
    pub training_readiness: Option<ReadinessSnapshot>,
    /// `None` when the sleep dataset is absent
    pub sleep: Option<SleepSummary>,
    /// `None` when the daily stats dataset is absent
    pub daily: Option<DailySummary>,
    /// Most recent readings, oldest first; empty when there are none
    pub vo2_max: Vec<f64>,
}

/// Mean of the present values, `None` when there are none
fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean over a column only when the column exists
fn column_mean<T>(
    table: &Table,
    column: &str,
    records: &[T],
    value: impl Fn(&T) -> Option<f64>,
) -> Option<f64> {
    if table.has_column(column) {
        mean(records.iter().map(value))
    } else {
        debug!(column, "Column absent, metric unavailable");
        None
    }
}

fn hrv_summary(sleep: &Table) -> Option<HrvSummary> {
    let values: Vec<f64> = chronological(SleepRecord::all(sleep))
        .into_iter()
        .filter_map(|record| record.avg_overnight_hrv)
        .collect();
    let recent = &values[values.len().saturating_sub(windows::RECOVERY_RECORDS)..];
    Some(HrvSummary {
        average_ms: mean(recent.iter().copied().map(Some))?,
        latest_ms: *recent.last()?,
    })
}

fn sleep_summary(sleep: &Table) -> SleepSummary {
    let recent = most_recent(SleepRecord::all(sleep), windows::RECOVERY_RECORDS);
    SleepSummary {
        average_hours: mean(recent.iter().map(|record| record.sleep_time_seconds))
            .map(|seconds| seconds / SECONDS_PER_HOUR),
        average_score: mean(
            recent
                .iter()
                .map(|record| record.sleep_score.as_ref().and_then(CellValue::as_number)),
        ),
        latest_score: recent.last().and_then(|record| record.sleep_score.clone()),
    }
}

fn daily_summary(daily: &Table) -> DailySummary {
    let recent = most_recent(DailyStatsRecord::all(daily), windows::RECOVERY_RECORDS);
    DailySummary {
        average_steps: column_mean(daily, fields::TOTAL_STEPS, &recent, |r| r.total_steps),
        average_resting_hr: column_mean(daily, fields::RESTING_HEART_RATE, &recent, |r| {
            r.resting_heart_rate
        }),
        average_stress_minutes: column_mean(daily, fields::STRESS_DURATION, &recent, |r| {
            r.stress_duration
        })
        .map(|seconds| seconds / SECONDS_PER_MINUTE),
    }
}

fn readiness_snapshot(readiness: &Table) -> Option<ReadinessSnapshot> {
    let latest = most_recent(TrainingReadinessRecord::all(readiness), 1)
        .into_iter()
        .next()?;
    Some(ReadinessSnapshot {
        score: latest.score,
        level: latest.level,
        acute_load: latest.acute_load,
    })
}

fn vo2_max_readings(vo2: &Table) -> Vec<f64> {
    most_recent(Vo2MaxRecord::all(vo2), windows::VO2_MAX_RECORDS)
        .into_iter()
        .filter_map(|record| record.vo2_max_value)
        .collect()
}

/// Aggregate every recovery metric the export supports
#[must_use]
pub fn aggregate(store: &DataStore) -> RecoveryMetrics {
    let sleep = store.dataset(datasets::SLEEP_SUMMARY);
    RecoveryMetrics {
        hrv: sleep.and_then(hrv_summary),
        training_readiness: store
            .dataset(datasets::TRAINING_READINESS)
            .and_then(readiness_snapshot),
        sleep: sleep.map(sleep_summary),
        daily: store.dataset(datasets::DAILY_STATS).map(daily_summary),
        vo2_max: store
            .dataset(datasets::VO2_MAX)
            .map(vo2_max_readings)
            .unwrap_or_default(),
    }
}

fn or_unavailable(value: Option<&CellValue>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_owned(), ToString::to_string)
}

impl RecoveryMetrics {
    /// HRV status section
    #[must_use]
    pub fn hrv_narrative(&self) -> String {
        self.hrv.map_or_else(
            || "No HRV data available.".to_owned(),
            |hrv| {
                format!(
                    "\n**HRV Status:**\n\nAverage overnight HRV for last 7 days is {} ms\nLast overnight HRV is {} ms",
                    hrv.average_ms as i64, hrv.latest_ms as i64
                )
            },
        )
    }

    /// Training readiness block, `None` when the dataset is absent
    #[must_use]
    pub fn readiness_block(&self) -> Option<String> {
        self.training_readiness.as_ref().map(|readiness| {
            format!(
                "\n**Training Readiness:**\n- Score: {}\n- Level: {}\n- Acute Load: {}",
                or_unavailable(readiness.score.as_ref()),
                or_unavailable(readiness.level.as_ref()),
                or_unavailable(readiness.acute_load.as_ref()),
            )
        })
    }

    /// Sleep block, `None` when the dataset is absent
    #[must_use]
    pub fn sleep_block(&self) -> Option<String> {
        self.sleep.as_ref().map(|sleep| {
            format!(
                "\n**Recent Sleep (7-day average):**\n- Duration: {}\n- Average Score: {}\n- Latest Score: {}",
                sleep
                    .average_hours
                    .map_or_else(|| UNAVAILABLE.to_owned(), |hours| format!("{hours:.1} hours")),
                sleep
                    .average_score
                    .map_or_else(|| UNAVAILABLE.to_owned(), |score| format!("{score:.0}")),
                or_unavailable(sleep.latest_score.as_ref()),
            )
        })
    }

    /// Daily metrics block; absent metrics are left out, the whole block when all are
    #[must_use]
    pub fn daily_block(&self) -> Option<String> {
        let daily = self.daily.filter(|daily| !daily.is_empty())?;
        let mut lines = vec!["\n**Daily Metrics (7-day average):**".to_owned()];
        if let Some(steps) = daily.average_steps {
            lines.push(format!("- Steps: {steps:.0}"));
        }
        if let Some(resting_hr) = daily.average_resting_hr {
            lines.push(format!("- Resting Heart Rate: {resting_hr:.0} bpm"));
        }
        if let Some(stress) = daily.average_stress_minutes {
            lines.push(format!("- Stress Duration: {stress:.0} min"));
        }
        Some(lines.join("\n"))
    }

    /// Recent VO2 max readings, `None` when there are none
    #[must_use]
    pub fn vo2_max_block(&self) -> Option<String> {
        if self.vo2_max.is_empty() {
            return None;
        }
        let readings = self
            .vo2_max
            .iter()
            .map(|value| format_number(*value))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "\n**Recent VO2 Max:**\n- Readings (oldest to newest): {readings}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_skips_missing_values() {
        assert_eq!(mean([Some(2.0), None, Some(4.0)]), Some(3.0));
        assert_eq!(mean([None, None]), None);
    }

    #[test]
    fn test_hrv_narrative_truncates_to_whole_ms() {
        let metrics = RecoveryMetrics {
            hrv: Some(HrvSummary {
                average_ms: 61.86,
                latest_ms: 58.2,
            }),
            ..RecoveryMetrics::default()
        };
        assert_eq!(
            metrics.hrv_narrative(),
            "\n**HRV Status:**\n\nAverage overnight HRV for last 7 days is 61 ms\nLast overnight HRV is 58 ms"
        );
        assert_eq!(
            RecoveryMetrics::default().hrv_narrative(),
            "No HRV data available."
        );
    }

    #[test]
    fn test_daily_block_omits_unavailable_metrics() {
        let metrics = RecoveryMetrics {
            daily: Some(DailySummary {
                average_steps: Some(8421.4),
                average_resting_hr: None,
                average_stress_minutes: Some(95.0),
            }),
            ..RecoveryMetrics::default()
        };
        assert_eq!(
            metrics.daily_block().as_deref(),
            Some("\n**Daily Metrics (7-day average):**\n- Steps: 8421\n- Stress Duration: 95 min")
        );

        let empty = RecoveryMetrics {
            daily: Some(DailySummary::default()),
            ..RecoveryMetrics::default()
        };
        assert_eq!(empty.daily_block(), None);
    }

    #[test]
    fn test_readiness_marks_missing_fields() {
        let metrics = RecoveryMetrics {
            training_readiness: Some(ReadinessSnapshot {
                score: Some(CellValue::Number(72.0)),
                level: Some(CellValue::Text("MODERATE".to_owned())),
                acute_load: None,
            }),
            ..RecoveryMetrics::default()
        };
        assert_eq!(
            metrics.readiness_block().as_deref(),
            Some("\n**Training Readiness:**\n- Score: 72\n- Level: MODERATE\n- Acute Load: N/A")
        );
    }
}

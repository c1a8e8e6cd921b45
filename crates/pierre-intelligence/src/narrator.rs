// ABOUTME: Weekly activity narrator producing one log line per day of the trailing week
// ABOUTME: Reconciles climbing durations, annotates cardio heart rate, and marks rest days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_possible_truncation)] // Safe: heart rates are small positive values

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use pierre_core::constants::{activity_types, datasets, fields};
use pierre_core::models::{ActivityRecord, ClimbingDetailRecord, DataStore};
use tracing::debug;

use crate::duration::format_duration;
use crate::reconciler::reconcile;
use crate::window::{chronological, resolve_reference, TrailingWindow};

const HEADER: &str = "**Previous Week's Activities:**\n";
const REST_DAY: &str = "REST DAY (no activities recorded)";
const NO_ACTIVITY_DATA: &str = "No activity data found.";

/// One activity as it appears in the weekly log
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedActivity {
    /// Raw activity type, `unknown` when missing
    pub activity_type: String,
    /// Effort in seconds
    pub duration_seconds: f64,
    /// Average and maximum heart rate, only for cardio activities with both values
    pub heart_rate: Option<(i64, i64)>,
}

impl LoggedActivity {
    /// Render as `<Type> (<duration>[, Avg HR x, Max HR y])`
    #[must_use]
    pub fn describe(&self) -> String {
        let hr = self
            .heart_rate
            .map(|(avg, max)| format!(", Avg HR {avg}, Max HR {max}"))
            .unwrap_or_default();
        format!(
            "{} ({}{hr})",
            humanize_activity_type(&self.activity_type),
            format_duration(Some(self.duration_seconds)),
        )
    }
}

/// Turn a raw activity type into a label: `indoor_cycling` reads `Indoor Cycling`
///
/// Every word is title-cased; `Indoor Climbing` is shortened to `Climbing`.
#[must_use]
pub fn humanize_activity_type(activity_type: &str) -> String {
    let mut label = String::with_capacity(activity_type.len());
    let mut previous_is_letter = false;
    for ch in activity_type.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                label.extend(ch.to_lowercase());
            } else {
                label.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            label.push(ch);
            previous_is_letter = false;
        }
    }

    if label == "Indoor Climbing" {
        "Climbing".to_owned()
    } else {
        label
    }
}

/// Activities of the trailing week grouped by calendar day
///
/// Returns `None` when the export has no activities at all. `No Activity`
/// sentinel rows and rows without a timestamp are left out.
#[must_use]
pub fn weekly_activities(
    store: &DataStore,
    window: &TrailingWindow,
) -> Option<BTreeMap<NaiveDate, Vec<LoggedActivity>>> {
    let activities = store.dataset(datasets::ACTIVITY_SUMMARY)?;
    let routes = store
        .dataset(datasets::CLIMBING_ROUTES)
        .map(|table| ClimbingDetailRecord::all(table, fields::CLIMBING_GRADE))
        .unwrap_or_default();
    let problems = store
        .dataset(datasets::BOULDER_PROBLEMS)
        .map(|table| ClimbingDetailRecord::all(table, fields::BOULDERING_GRADE))
        .unwrap_or_default();

    let records: Vec<ActivityRecord> = ActivityRecord::all(activities)
        .into_iter()
        .filter(|record| record.activity_type.as_deref() != Some(activity_types::NO_ACTIVITY))
        .collect();

    let mut by_day: BTreeMap<NaiveDate, Vec<LoggedActivity>> = BTreeMap::new();
    for record in chronological(records) {
        let Some(time) = record.time.filter(|time| window.contains(*time)) else {
            continue;
        };
        let logged = log_activity(&record, &routes, &problems);
        by_day.entry(time.date_naive()).or_default().push(logged);
    }

    debug!(days = by_day.len(), "Grouped weekly activities");
    Some(by_day)
}

fn log_activity(
    record: &ActivityRecord,
    routes: &[ClimbingDetailRecord],
    problems: &[ClimbingDetailRecord],
) -> LoggedActivity {
    let activity_type = record
        .activity_type
        .clone()
        .unwrap_or_else(|| activity_types::UNKNOWN.to_owned());

    let duration_seconds = if activity_types::CLIMBING.contains(&activity_type.as_str()) {
        record
            .activity_id
            .as_ref()
            .map_or(0.0, |id| reconcile(id, routes, problems))
    } else {
        record
            .moving_duration
            .or(record.elapsed_duration)
            .unwrap_or(0.0)
    };

    let heart_rate = if activity_types::CARDIO.contains(&activity_type.as_str()) {
        heart_rate_pair(record.average_hr, record.max_hr)
    } else {
        None
    };

    LoggedActivity {
        activity_type,
        duration_seconds,
        heart_rate,
    }
}

/// Both heart-rate values truncated to whole bpm, `None` if either is missing or zero
fn heart_rate_pair(average: Option<f64>, max: Option<f64>) -> Option<(i64, i64)> {
    let whole = |value: Option<f64>| {
        value
            .filter(|bpm| bpm.is_finite())
            .map(|bpm| bpm as i64)
            .filter(|bpm| *bpm != 0)
    };
    Some((whole(average)?, whole(max)?))
}

/// Narrate the seven days before `reference` (default: now), oldest first
///
/// Every day gets exactly one line; days without activities are rest days.
#[must_use]
pub fn narrate(store: &DataStore, reference: Option<DateTime<Utc>>) -> String {
    let window = TrailingWindow::ending_at(resolve_reference(reference));
    let Some(by_day) = weekly_activities(store, &window) else {
        return NO_ACTIVITY_DATA.to_owned();
    };

    let mut lines = vec![HEADER.to_owned()];
    for day in window.prior_days() {
        let entries = by_day
            .get(&day)
            .filter(|entries| !entries.is_empty())
            .map_or_else(
                || REST_DAY.to_owned(),
                |entries| {
                    entries
                        .iter()
                        .map(LoggedActivity::describe)
                        .collect::<Vec<_>>()
                        .join(" + ")
                },
            );
        lines.push(format!("* {}: {entries}", day.format("%a %b %d")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_activity_types() {
        assert_eq!(humanize_activity_type("running"), "Running");
        assert_eq!(humanize_activity_type("indoor_cycling"), "Indoor Cycling");
        assert_eq!(humanize_activity_type("indoor_climbing"), "Climbing");
        assert_eq!(humanize_activity_type("bouldering"), "Bouldering");
        assert_eq!(humanize_activity_type("TRAIL_RUNNING"), "Trail Running");
    }

    #[test]
    fn test_heart_rate_requires_both_values() {
        assert_eq!(heart_rate_pair(Some(150.7), Some(171.2)), Some((150, 171)));
        assert_eq!(heart_rate_pair(Some(150.0), None), None);
        assert_eq!(heart_rate_pair(Some(0.0), Some(170.0)), None);
    }

    #[test]
    fn test_describe_with_heart_rate() {
        let activity = LoggedActivity {
            activity_type: "running".to_owned(),
            duration_seconds: 2700.0,
            heart_rate: Some((148, 176)),
        };
        assert_eq!(activity.describe(), "Running (45 min, Avg HR 148, Max HR 176)");
    }
}

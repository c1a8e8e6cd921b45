// ABOUTME: Human-readable duration formatting shared by every narrative section
// ABOUTME: Minutes below ninety, one-decimal hours at or above
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_possible_truncation)] // Safe: minute counts are far below i64 range

/// Durations of at least this many minutes are shown in hours
const HOURS_THRESHOLD_MINUTES: f64 = 90.0;

const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Format a duration in seconds
///
/// Missing, zero, or non-finite durations read `0 min`. Below ninety minutes the
/// minute count is truncated; from ninety minutes on, hours with one decimal.
#[must_use]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|value| value.is_finite() && *value != 0.0) else {
        return "0 min".to_owned();
    };

    let minutes = seconds / SECONDS_PER_MINUTE;
    if minutes >= HOURS_THRESHOLD_MINUTES {
        format!("{:.1} hours", minutes / MINUTES_PER_HOUR)
    } else {
        format!("{} min", minutes as i64)
    }
}

// ABOUTME: Trailing seven-day window and most-recent-N selection over timestamped records
// ABOUTME: Shared by the narrator, the discipline analyzer, and the recovery aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use pierre_core::constants::windows::WEEK_DAYS;
use pierre_core::models::Timestamped;

/// Resolve the reference instant of a run, defaulting to now (UTC)
#[must_use]
pub fn resolve_reference(reference: Option<DateTime<Utc>>) -> DateTime<Utc> {
    reference.unwrap_or_else(Utc::now)
}

/// Reference instant for a calendar date: midnight UTC
#[must_use]
pub fn reference_from_date(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// The half-open interval `[midnight(reference - 7 days), reference)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TrailingWindow {
    /// Window of the seven days before `reference`
    #[must_use]
    pub fn ending_at(reference: DateTime<Utc>) -> Self {
        let first_day = (reference - Duration::days(WEEK_DAYS)).date_naive();
        Self {
            start: reference_from_date(first_day),
            end: reference,
        }
    }

    /// Inclusive lower bound
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound (the reference instant)
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// The seven calendar days strictly before the reference date, oldest first
    #[must_use]
    pub fn prior_days(&self) -> Vec<NaiveDate> {
        let reference_day = self.end.date_naive();
        (1..=WEEK_DAYS)
            .rev()
            .map(|offset| reference_day - Duration::days(offset))
            .collect()
    }
}

/// Sort records by timestamp, oldest first
///
/// The sort is stable; records without a timestamp come before every timestamped one.
#[must_use]
pub fn chronological<T: Timestamped>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by_key(T::time);
    records
}

/// The `count` most recent records in chronological order
#[must_use]
pub fn most_recent<T: Timestamped>(records: Vec<T>, count: usize) -> Vec<T> {
    let mut sorted = chronological(records);
    let skip = sorted.len().saturating_sub(count);
    sorted.drain(..skip);
    sorted
}

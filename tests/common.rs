// ABOUTME: Shared fixtures for integration tests: a sample export and a fixed reference instant
// ABOUTME: The export covers every dataset the summarization engine reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};

/// Monday, March 10, 2025 at 08:00 UTC
pub fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).single().unwrap()
}

pub const ACTIVITIES: &str = "\
## Activity Summary

| ActivityID | time | activityType | movingDuration | elapsedDuration | averageHR | maxHR |
|---|---|---|---|---|---|---|
| 1 | 2025-03-04 07:00:00 | running | 1800 | 1900 | 150.6 | 172 |
| 2 | 2025-03-06 18:00:00 | indoor_climbing |  | 5400 |  |  |
| 3 | 2025-03-06 20:00:00 | strength_training |  | 2400 | 110 | 140 |
| 4 | 2025-03-07 00:00:00 | No Activity |  |  |  |  |
| 5 | 2025-02-20 07:00:00 | running | 3600 |  | 140 | 160 |
| 6 | 2025-03-10 06:00:00 | cycling | 3600 |  | 130 | 150 |
| 7 | 2025-02-25 18:00:00 | bouldering |  | 3600 |  |  |
";

pub const CLIMBING: &str = "\
## Climbing Routes

| ActivityID | Duration | climbingGrade | resultType | attemptCount |
|---|---|---|---|---|
| 2 | 600 | 6a | completed | 1 |
| 2 | 900 | 6b | fell | 3 |
| 7 | 300 | 5c | completed | 1 |

## Boulder Problems

| ActivityID | Duration | boulderingGrade | resultType | attemptCount |
|---|---|---|---|---|
| 2 | 1200 | V3 | Topped | 2 |
";

pub const RECOVERY: &str = "\
## Sleep Summary

| time | avgOvernightHrv | sleepTimeSeconds | sleepScore |
|---|---|---|---|
| 2025-03-05 | 56 | 28800 | 80 |
| 2025-03-02 | 50 | 28800 | 80 |
| 2025-03-08 | 62 | 28800 | 87 |
| 2025-03-03 | 52 | 28800 | 80 |
| 2025-03-04 | 54 | 28800 | 80 |
| 2025-03-06 | 58 | 28800 | 80 |
| 2025-03-07 | 60 | 28800 | 80 |
| 2025-03-01 | 100 | 3600 | 20 |

## Daily Stats

| time | totalSteps | restingHeartRate | stressDuration |
|---|---|---|---|
| 2025-03-08 | 8000 | 50 | 3600 |
| 2025-03-09 | 10000 | 52 | 7200 |

## Training Readiness

| time | score | level | acuteLoad |
|---|---|---|---|
| 2025-03-09 | 72 | MODERATE |  |

## VO2_Max

| time | vo2MaxValue |
|---|---|
| 2025-02-01 | 50 |
| 2025-02-08 | 51 |
| 2025-02-15 | 52 |
| 2025-02-22 | 53.5 |
";

/// Every dataset in one markdown document
pub fn full_export() -> String {
    format!("# Garmin Export\n\n{ACTIVITIES}\n{CLIMBING}\n{RECOVERY}")
}

// ABOUTME: Duration reconciliation for climbing and bouldering sessions
// ABOUTME: Sums per-route and per-problem durations instead of the session clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{ActivityId, ClimbingDetailRecord};

/// True effort of a climbing session in seconds
///
/// Session clocks of climbing and bouldering activities include rest and setup
/// time, so the effort is the sum of the `Duration` of every route and problem
/// recorded against `activity_id`. Empty detail tables contribute nothing and
/// records without a duration count as zero.
#[must_use]
pub fn reconcile(
    activity_id: &ActivityId,
    routes: &[ClimbingDetailRecord],
    problems: &[ClimbingDetailRecord],
) -> f64 {
    routes
        .iter()
        .chain(problems)
        .filter(|record| record.activity_id.as_ref() == Some(activity_id))
        .filter_map(|record| record.duration)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: i64, duration: Option<f64>) -> ClimbingDetailRecord {
        ClimbingDetailRecord {
            activity_id: Some(ActivityId::from(id)),
            duration,
            ..ClimbingDetailRecord::default()
        }
    }

    #[test]
    fn test_no_details_reconciles_to_zero() {
        assert!(reconcile(&ActivityId::from(1), &[], &[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sums_both_tables_for_matching_id_only() {
        let routes = vec![detail(1, Some(300.0)), detail(2, Some(999.0)), detail(1, None)];
        let problems = vec![detail(1, Some(120.0)), detail(3, Some(50.0))];
        let total = reconcile(&ActivityId::from(1), &routes, &problems);
        assert!((total - 420.0).abs() < f64::EPSILON);
    }
}

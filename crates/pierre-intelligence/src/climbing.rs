// ABOUTME: Discipline analyzer for climbing routes and bouldering problems of the trailing week
// ABOUTME: Grade distribution, completion rate, average attempts, and total time per discipline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_precision_loss)] // Safe: route counts are tiny

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use pierre_core::constants::{activity_types, datasets, fields, outcomes};
use pierre_core::models::{ActivityId, ActivityRecord, ClimbingDetailRecord, DataStore, Table};
use serde::Serialize;

use crate::duration::format_duration;
use crate::window::{resolve_reference, TrailingWindow};

/// A detail table analyzed on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Discipline {
    /// Rope routes (`ClimbingRoutes`)
    Routes,
    /// Boulder problems (`BoulderProblems`)
    Problems,
}

impl Discipline {
    /// Dataset holding this discipline's detail records
    #[must_use]
    pub const fn dataset(self) -> &'static str {
        match self {
            Self::Routes => datasets::CLIMBING_ROUTES,
            Self::Problems => datasets::BOULDER_PROBLEMS,
        }
    }

    /// Column holding the grade
    #[must_use]
    pub const fn grade_field(self) -> &'static str {
        match self {
            Self::Routes => fields::CLIMBING_GRADE,
            Self::Problems => fields::BOULDERING_GRADE,
        }
    }

    /// Outcomes counted as completed, compared case-insensitively
    #[must_use]
    pub const fn completed_outcomes(self) -> &'static [&'static str] {
        match self {
            Self::Routes => outcomes::ROUTE_COMPLETED,
            Self::Problems => outcomes::PROBLEM_COMPLETED,
        }
    }

    const fn heading(self) -> &'static str {
        match self {
            Self::Routes => "**Climbing Routes (Last 7 Days):**",
            Self::Problems => "**Bouldering Problems (Last 7 Days):**",
        }
    }

    const fn unit(self) -> &'static str {
        match self {
            Self::Routes => "route",
            Self::Problems => "problem",
        }
    }

    const fn time_label(self) -> &'static str {
        match self {
            Self::Routes => "climbing",
            Self::Problems => "bouldering",
        }
    }
}

/// Completed versus attempted routes or problems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Records whose outcome is in the completed vocabulary
    pub completed: usize,
    /// All records
    pub attempted: usize,
}

impl Completion {
    /// Completion rate in percent, 0 when nothing was attempted
    #[must_use]
    pub fn rate_percent(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.completed as f64 / self.attempted as f64 * 100.0
        }
    }
}

/// Statistics of one discipline over the trailing week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineStats {
    /// Which detail table these come from
    pub discipline: Discipline,
    /// Number of routes or problems
    pub attempts: usize,
    /// `(grade, count)` by descending count; ties keep first-seen order
    pub grades: Vec<(String, usize)>,
    /// Present only when the export has an outcome column
    pub completion: Option<Completion>,
    /// Mean of the recorded attempt counts, if any were recorded
    pub average_attempts: Option<f64>,
    /// Sum of the raw `Duration` column in seconds
    pub total_seconds: f64,
}

impl DisciplineStats {
    /// Compute statistics for the records of `table` that belong to `activity_ids`
    ///
    /// Returns `None` when no record matches.
    #[must_use]
    pub fn compute(
        discipline: Discipline,
        table: &Table,
        activity_ids: &HashSet<ActivityId>,
    ) -> Option<Self> {
        let records: Vec<ClimbingDetailRecord> =
            ClimbingDetailRecord::all(table, discipline.grade_field())
                .into_iter()
                .filter(|record| {
                    record
                        .activity_id
                        .as_ref()
                        .is_some_and(|id| activity_ids.contains(id))
                })
                .collect();
        if records.is_empty() {
            return None;
        }

        let completion = table.has_column(fields::RESULT_TYPE).then(|| Completion {
            completed: records
                .iter()
                .filter(|record| is_completed(record, discipline))
                .count(),
            attempted: records.len(),
        });

        let attempt_counts: Vec<f64> = records.iter().filter_map(|r| r.attempt_count).collect();
        let average_attempts = (!attempt_counts.is_empty())
            .then(|| attempt_counts.iter().sum::<f64>() / attempt_counts.len() as f64);

        Some(Self {
            discipline,
            attempts: records.len(),
            grades: grade_distribution(&records),
            completion,
            average_attempts,
            total_seconds: records.iter().filter_map(|record| record.duration).sum(),
        })
    }

    /// Render the section, starting with a blank line
    #[must_use]
    pub fn render(&self) -> String {
        let unit = self.discipline.unit();
        let mut lines = vec![
            format!("\n{}", self.discipline.heading()),
            format!("- Total {unit}s attempted: {}", self.attempts),
        ];

        if !self.grades.is_empty() {
            let grades = self
                .grades
                .iter()
                .map(|(grade, count)| format!("{grade}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("- Grades attempted: {grades}"));
        }
        if let Some(completion) = self.completion {
            lines.push(format!(
                "- Completion rate: {:.0}% ({}/{})",
                completion.rate_percent(),
                completion.completed,
                completion.attempted
            ));
        }
        if let Some(average) = self.average_attempts {
            lines.push(format!("- Average attempts per {unit}: {average:.1}"));
        }
        lines.push(format!(
            "- Total {} time: {}",
            self.discipline.time_label(),
            format_duration(Some(self.total_seconds))
        ));

        lines.join("\n")
    }
}

fn is_completed(record: &ClimbingDetailRecord, discipline: Discipline) -> bool {
    record.result_type.as_deref().is_some_and(|outcome| {
        discipline
            .completed_outcomes()
            .iter()
            .any(|completed| outcome.trim().eq_ignore_ascii_case(completed))
    })
}

/// Count grades, most frequent first, ties in first-seen order
fn grade_distribution(records: &[ClimbingDetailRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for grade in records.iter().filter_map(|record| record.grade.as_deref()) {
        match counts.iter_mut().find(|(seen, _)| seen == grade) {
            Some((_, count)) => *count += 1,
            None => counts.push((grade.to_owned(), 1)),
        }
    }
    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Identifiers of climbing and bouldering activities inside `window`
#[must_use]
pub fn climbing_activity_ids(store: &DataStore, window: &TrailingWindow) -> HashSet<ActivityId> {
    store
        .dataset(datasets::ACTIVITY_SUMMARY)
        .map(ActivityRecord::all)
        .unwrap_or_default()
        .into_iter()
        .filter(|record| {
            record.time.is_some_and(|time| window.contains(time))
                && record
                    .activity_type
                    .as_deref()
                    .is_some_and(|kind| activity_types::CLIMBING.contains(&kind))
        })
        .filter_map(|record| record.activity_id)
        .collect()
}

/// Statistics for routes then problems of the week before `reference`
#[must_use]
pub fn discipline_stats(store: &DataStore, reference: Option<DateTime<Utc>>) -> Vec<DisciplineStats> {
    let window = TrailingWindow::ending_at(resolve_reference(reference));
    let ids = climbing_activity_ids(store, &window);
    if ids.is_empty() {
        return Vec::new();
    }

    [Discipline::Routes, Discipline::Problems]
        .into_iter()
        .filter_map(|discipline| {
            store
                .dataset(discipline.dataset())
                .and_then(|table| DisciplineStats::compute(discipline, table, &ids))
        })
        .collect()
}

/// Climbing and bouldering analysis of the week before `reference`
///
/// Empty when no climbing detail falls inside the window.
#[must_use]
pub fn analyze_climbing(store: &DataStore, reference: Option<DateTime<Utc>>) -> String {
    discipline_stats(store, reference)
        .iter()
        .map(DisciplineStats::render)
        .collect::<Vec<_>>()
        .join("\n")
}

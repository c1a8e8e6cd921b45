// ABOUTME: Prompt assembler joining every summary section in a fixed order
// ABOUTME: Date header, weekly log, discipline analysis, recovery blocks, closing instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pierre_core::models::DataStore;
use tracing::debug;

use crate::climbing::analyze_climbing;
use crate::narrator::narrate;
use crate::recovery::aggregate;
use crate::window::resolve_reference;

/// Instructions closing every prompt
pub const CLOSING_INSTRUCTIONS: &str = "\n\nPlease provide a comprehensive health report with:\n\
1. Daily Performance Summary\n\
2. Activity-Specific Coaching (including climbing/bouldering analysis if data is present)\n\
3. Recovery & Readiness Insights\n\
4. Recommendations for today and tomorrow";

/// Opening line naming the reference date
#[must_use]
pub fn date_header(reference: DateTime<Utc>) -> String {
    format!(
        "Today is {}. Please analyze my recent Garmin health and training data and provide a comprehensive daily health report.\n",
        reference.format("%A, %B %d, %Y")
    )
}

/// Build the full prompt for the export in `store`
///
/// Sections are always in the same order; optional ones are either rendered
/// completely or left out.
#[must_use]
pub fn assemble_prompt(store: &DataStore, reference: Option<DateTime<Utc>>) -> String {
    let reference = resolve_reference(reference);
    let metrics = aggregate(store);

    let mut parts = vec![date_header(reference), narrate(store, Some(reference))];

    let discipline = analyze_climbing(store, Some(reference));
    if !discipline.is_empty() {
        parts.push(discipline);
    }
    parts.push(metrics.hrv_narrative());
    parts.extend(metrics.readiness_block());
    parts.extend(metrics.sleep_block());
    parts.extend(metrics.daily_block());
    parts.extend(metrics.vo2_max_block());
    parts.push(CLOSING_INSTRUCTIONS.to_owned());

    debug!(sections = parts.len(), "Assembled prompt");
    parts.join("\n")
}

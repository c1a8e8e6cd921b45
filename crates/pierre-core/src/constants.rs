// ABOUTME: Export-format constants: dataset names, field names, and activity vocabularies
// ABOUTME: Pure data constants organized by domain for the training report pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants describing the fitness-tracker export layout.

/// Dataset (table) names in the export
pub mod datasets {
    /// One row per recorded activity
    pub const ACTIVITY_SUMMARY: &str = "ActivitySummary";
    /// Per-route records of indoor climbing sessions
    pub const CLIMBING_ROUTES: &str = "ClimbingRoutes";
    /// Per-problem records of bouldering sessions
    pub const BOULDER_PROBLEMS: &str = "BoulderProblems";
    /// Nightly sleep summaries
    pub const SLEEP_SUMMARY: &str = "SleepSummary";
    /// Daily step/heart-rate/stress totals
    pub const DAILY_STATS: &str = "DailyStats";
    /// Aerobic capacity readings
    pub const VO2_MAX: &str = "VO2Max";
    /// Daily training readiness scores
    pub const TRAINING_READINESS: &str = "TrainingReadiness";

    /// Alternative dataset names accepted by the loader, mapped to their canonical name
    pub const ALIASES: &[(&str, &str)] = &[("VO2_Max", VO2_MAX)];
}

/// Field (column) names in the export
pub mod fields {
    /// Timestamp column normalized in every dataset
    pub const TIME: &str = "time";
    /// Activity identifier, also the foreign key of climbing detail tables
    pub const ACTIVITY_ID: &str = "ActivityID";
    /// Activity type (e.g. `running`, `indoor_climbing`)
    pub const ACTIVITY_TYPE: &str = "activityType";
    /// User-facing activity name
    pub const ACTIVITY_NAME: &str = "activityName";
    /// Moving time in seconds
    pub const MOVING_DURATION: &str = "movingDuration";
    /// Wall-clock time in seconds
    pub const ELAPSED_DURATION: &str = "elapsedDuration";
    /// Average heart rate in bpm
    pub const AVERAGE_HR: &str = "averageHR";
    /// Maximum heart rate in bpm
    pub const MAX_HR: &str = "maxHR";

    /// Duration of one route or problem in seconds
    pub const DURATION: &str = "Duration";
    /// Route grade
    pub const CLIMBING_GRADE: &str = "climbingGrade";
    /// Problem grade
    pub const BOULDERING_GRADE: &str = "boulderingGrade";
    /// Outcome of a route or problem
    pub const RESULT_TYPE: &str = "resultType";
    /// Attempts on a route or problem
    pub const ATTEMPT_COUNT: &str = "attemptCount";

    /// Overnight HRV in milliseconds
    pub const AVG_OVERNIGHT_HRV: &str = "avgOvernightHrv";
    /// Time asleep in seconds
    pub const SLEEP_TIME_SECONDS: &str = "sleepTimeSeconds";
    /// Sleep score
    pub const SLEEP_SCORE: &str = "sleepScore";

    /// Steps for the day
    pub const TOTAL_STEPS: &str = "totalSteps";
    /// Resting heart rate in bpm
    pub const RESTING_HEART_RATE: &str = "restingHeartRate";
    /// Time under stress in seconds
    pub const STRESS_DURATION: &str = "stressDuration";

    /// Training readiness score
    pub const SCORE: &str = "score";
    /// Training readiness level
    pub const LEVEL: &str = "level";
    /// Acute training load
    pub const ACUTE_LOAD: &str = "acuteLoad";

    /// VO2 max reading
    pub const VO2_MAX_VALUE: &str = "vo2MaxValue";
}

/// Activity type vocabulary
pub mod activity_types {
    /// Sentinel for days without a real session
    pub const NO_ACTIVITY: &str = "No Activity";
    /// Rope climbing in a gym
    pub const INDOOR_CLIMBING: &str = "indoor_climbing";
    /// Bouldering
    pub const BOULDERING: &str = "bouldering";

    /// Types whose session clock is unreliable and whose duration comes from detail records
    pub const CLIMBING: &[&str] = &[INDOOR_CLIMBING, BOULDERING];

    /// Types that get a heart-rate annotation in the weekly log
    pub const CARDIO: &[&str] = &["running", "cycling", "indoor_cycling"];

    /// Label for activities whose type is missing
    pub const UNKNOWN: &str = "unknown";
}

/// Outcome vocabularies that count as a completed route or problem (compared case-insensitively)
pub mod outcomes {
    /// Completed route outcomes
    pub const ROUTE_COMPLETED: &[&str] = &["completed", "sent"];
    /// Completed problem outcomes
    pub const PROBLEM_COMPLETED: &[&str] = &["completed", "sent", "topped"];
}

/// Trailing window sizes
pub mod windows {
    /// Days covered by the weekly log and the discipline analysis
    pub const WEEK_DAYS: i64 = 7;
    /// Records used for HRV, sleep, and daily averages
    pub const RECOVERY_RECORDS: usize = 7;
    /// Aerobic capacity readings reported
    pub const VO2_MAX_RECORDS: usize = 3;
}

/// Placeholder for a field that has no value
pub const UNAVAILABLE: &str = "N/A";

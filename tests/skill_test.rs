// ABOUTME: Integration tests for the trainer skill file and athlete profile resolution
// ABOUTME: Tests frontmatter stripping, the profile directive, and user message composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used)]
// Allow raw string hashes for readability in test fixtures
#![allow(clippy::needless_raw_string_hashes)]

use std::fs;
use std::path::Path;

use pierre_core::errors::ErrorCode;
use pierre_training_report::skill::{
    compose_user_message, load_profile, load_skill, parse_skill, split_frontmatter,
};
use tempfile::TempDir;

const SAMPLE_SKILL: &str = r#"---
name: personal-trainer
description: Daily coaching from Garmin data
---

# Personal Trainer

You are an experienced strength and climbing coach.

USER_PROFILE_PATH: profiles/athlete.md
"#;

#[test]
fn test_frontmatter_is_stripped_from_instructions() {
    let skill = parse_skill(SAMPLE_SKILL, Path::new("/skills")).unwrap();
    assert_eq!(skill.frontmatter.name.as_deref(), Some("personal-trainer"));
    assert_eq!(
        skill.frontmatter.description.as_deref(),
        Some("Daily coaching from Garmin data")
    );
    assert!(skill.instructions.starts_with("# Personal Trainer"));
    assert!(!skill.instructions.contains("name: personal-trainer"));
    assert_eq!(
        skill.profile_path.as_deref(),
        Some(Path::new("/skills/profiles/athlete.md"))
    );
}

#[test]
fn test_skill_without_frontmatter_or_directive() {
    let (yaml, body) = split_frontmatter("  Just coach me.  \n");
    assert_eq!(yaml, None);
    assert_eq!(body, "Just coach me.");

    let skill = parse_skill("Just coach me.", Path::new(".")).unwrap();
    assert_eq!(skill.frontmatter.name, None);
    assert_eq!(skill.profile_path, None);
    assert_eq!(skill.instructions, "Just coach me.");
}

#[test]
fn test_unparseable_frontmatter_falls_back_to_default() {
    let skill = parse_skill("---\n: [unclosed\n---\nBody", Path::new(".")).unwrap();
    assert_eq!(skill.frontmatter.name, None);
    assert_eq!(skill.instructions, "Body");
}

#[test]
fn test_profile_loaded_relative_to_skill_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("profiles")).unwrap();
    fs::write(
        dir.path().join("profiles/athlete.md"),
        "\nAge 34, climbs 6b, runs twice a week.\n\n",
    )
    .unwrap();
    let skill_path = dir.path().join("SKILL.md");
    fs::write(&skill_path, SAMPLE_SKILL).unwrap();

    let skill = load_skill(&skill_path).unwrap();
    let profile = load_profile(&skill).unwrap();
    assert_eq!(
        profile.as_deref(),
        Some("Age 34, climbs 6b, runs twice a week.")
    );
}

#[test]
fn test_missing_profile_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let skill_path = dir.path().join("SKILL.md");
    fs::write(&skill_path, SAMPLE_SKILL).unwrap();

    let skill = load_skill(&skill_path).unwrap();
    assert_eq!(load_profile(&skill).unwrap(), None);
}

#[test]
fn test_unreadable_skill_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let error = load_skill(&dir.path().join("missing.md")).unwrap_err();
    assert_eq!(error.code, ErrorCode::InputUnreadable);
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_unreadable_profile_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let skill_path = dir.path().join("SKILL.md");
    fs::write(&skill_path, SAMPLE_SKILL).unwrap();
    fs::create_dir_all(dir.path().join("profiles")).unwrap();
    fs::write(dir.path().join("profiles/athlete.md"), [0xff, 0xfe, 0x00]).unwrap();

    let skill = load_skill(&skill_path).unwrap();
    let error = load_profile(&skill).unwrap_err();
    assert_eq!(error.code, ErrorCode::InputUnreadable);
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_compose_user_message() {
    assert_eq!(compose_user_message(None, "DATA"), "DATA");
    assert_eq!(
        compose_user_message(Some("PROFILE"), "DATA"),
        "# Athlete Profile\n\nPROFILE\n\n---\n\n# Training Data\n\nDATA"
    );
}

// ABOUTME: End-to-end tests of a report run with a stub model provider
// ABOUTME: Covers the written report, failure without output, prompt-only runs, and the writer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Test modules don't need documentation
#![allow(missing_docs)]
// Allow unwrap in tests - tests should panic on failure
#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use pierre_core::errors::{AppError, ErrorCode};
use pierre_training_report::config::{ConfigOverrides, ReportConfig};
use pierre_training_report::llm::{ChatRequest, ChatResponse, LlmProvider, MessageRole};
use pierre_training_report::pipeline::{run, run_with_provider, RunOptions, RunOutcome};
use pierre_training_report::report::{report_file_name, write_report};
use tempfile::TempDir;

/// Provider answering every request with a fixed outcome
struct StubProvider {
    reply: Result<String, ErrorCode>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubProvider {
    fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(code: ErrorCode) -> Self {
        Self {
            reply: Err(code),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn display_name(&self) -> &'static str {
        "Stub"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("end_turn".to_owned()),
            }),
            Err(code) => Err(AppError::new(*code, "stubbed failure")),
        }
    }
}

struct Workspace {
    dir: TempDir,
    config: ReportConfig,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("garmin_export.md");
        let skill = dir.path().join("SKILL.md");
        fs::write(&data, common::full_export()).unwrap();
        fs::write(
            &skill,
            "---\nname: coach\n---\nYou are my coach.\nUSER_PROFILE_PATH: athlete.md\n",
        )
        .unwrap();
        fs::write(dir.path().join("athlete.md"), "Boulderer, 34.").unwrap();

        let config = ReportConfig::from_lookup(|_| None)
            .unwrap()
            .apply_overrides(ConfigOverrides {
                data_path: Some(data),
                output_dir: Some(dir.path().join("reports")),
                skill_path: Some(skill),
                model: Some("claude-test".to_owned()),
                max_tokens: Some(1000),
            });
        Self { dir, config }
    }

    fn with_api_key(mut self) -> Self {
        self.config.api_key = Some("sk-test".to_owned());
        self
    }

    fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}

fn options(prompt_only: bool) -> RunOptions {
    RunOptions {
        reference: Some(common::reference()),
        prompt_only,
    }
}

#[tokio::test]
async fn test_successful_run_writes_dated_report() {
    let workspace = Workspace::new().with_api_key();
    let provider = StubProvider::replying("Great week. Rest today.");

    let outcome = run_with_provider(&workspace.config, options(false), &provider)
        .await
        .unwrap();
    let expected = workspace
        .output_dir()
        .join("training_analysis_2025-03-10.md");
    assert_eq!(outcome, RunOutcome::Report(expected.clone()));
    assert_eq!(
        fs::read_to_string(&expected).unwrap(),
        "# Training Analysis - Monday, March 10, 2025\n\nGreat week. Rest today."
    );

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model.as_deref(), Some("claude-test"));
    assert_eq!(request.max_tokens, Some(1000));
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert!(request.messages[0].content.starts_with("You are my coach."));
    assert_eq!(request.messages[1].role, MessageRole::User);
    assert!(request.messages[1]
        .content
        .starts_with("# Athlete Profile\n\nBoulderer, 34.\n\n---\n\n# Training Data\n\nToday is Monday, March 10, 2025."));
}

#[tokio::test]
async fn test_model_failure_writes_nothing() {
    let workspace = Workspace::new().with_api_key();
    let provider = StubProvider::failing(ErrorCode::ExternalRateLimited);

    let error = run_with_provider(&workspace.config, options(false), &provider)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.exit_code(), 3);
    assert_eq!(provider.calls(), 1);
    assert!(!workspace.output_dir().exists());
}

#[tokio::test]
async fn test_empty_completion_writes_nothing() {
    let workspace = Workspace::new().with_api_key();
    let provider = StubProvider::replying("   ");

    let error = run_with_provider(&workspace.config, options(false), &provider)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(!workspace.output_dir().exists());
}

#[tokio::test]
async fn test_failed_write_still_surfaces_the_analysis() {
    let mut workspace = Workspace::new().with_api_key();
    let blocker = workspace.dir.path().join("reports-file");
    fs::write(&blocker, "").unwrap();
    workspace.config.output_dir = blocker;
    let provider = StubProvider::replying("Deload this week. Sleep more.");

    let error = run_with_provider(&workspace.config, options(false), &provider)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::StorageError);
    assert_eq!(error.exit_code(), 4);
    assert_eq!(provider.calls(), 1);
    assert!(error.message.starts_with("Failed to create output directory"));
    assert!(error
        .message
        .ends_with("Unsaved analysis:\n\nDeload this week. Sleep more."));
    assert!(error.to_string().contains("Deload this week. Sleep more."));
}

#[tokio::test]
async fn test_prompt_only_run_skips_the_model() {
    let workspace = Workspace::new();
    let provider = StubProvider::replying("unused");

    let outcome = run_with_provider(&workspace.config, options(true), &provider)
        .await
        .unwrap();
    let RunOutcome::Prompt(prompt) = outcome else {
        panic!("expected a prompt outcome");
    };
    assert!(prompt.system_instruction.starts_with("You are my coach."));
    assert!(prompt.user_message.contains("**Previous Week's Activities:**"));
    assert_eq!(provider.calls(), 0);
    assert!(!workspace.output_dir().exists());

    let via_run = run(&workspace.config, options(true)).await.unwrap();
    assert_eq!(via_run, RunOutcome::Prompt(prompt));
}

#[tokio::test]
async fn test_missing_api_key_aborts_before_any_work() {
    let workspace = Workspace::new();
    let provider = StubProvider::replying("unused");

    let error = run_with_provider(&workspace.config, options(false), &provider)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert_eq!(provider.calls(), 0);

    let error = run(&workspace.config, options(false)).await.unwrap_err();
    assert_eq!(error.exit_code(), 2);
    assert!(!workspace.output_dir().exists());
}

#[tokio::test]
async fn test_missing_export_is_configuration_failure() {
    let workspace = Workspace::new().with_api_key();
    let config = workspace.config.clone().apply_overrides(ConfigOverrides {
        data_path: Some(workspace.dir.path().join("missing.md")),
        ..ConfigOverrides::default()
    });
    let provider = StubProvider::replying("unused");

    let error = run_with_provider(&config, options(false), &provider)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InputNotFound);
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_write_report_creates_directory_and_replaces_same_day() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nested/reports");
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

    let first = write_report(&output, "first", date).unwrap();
    let second = write_report(&output, "second", date).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, output.join(report_file_name(date)));
    assert_eq!(
        fs::read_to_string(&second).unwrap(),
        "# Training Analysis - Sunday, January 05, 2025\n\nsecond"
    );
}

#[test]
fn test_write_report_into_a_file_path_is_output_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

    let error = write_report(&blocker, "content", date).unwrap_err();
    assert_eq!(error.code, ErrorCode::StorageError);
    assert_eq!(error.exit_code(), 4);
}

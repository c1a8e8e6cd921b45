// ABOUTME: Run pipeline wiring configuration, loaders, summarization, the model call, and output
// ABOUTME: One pass per invocation; every failure surfaces as an AppError with an exit status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Run Pipeline
//!
//! `loader -> summarization -> model -> report writer`, executed once:
//!
//! 1. validate configuration (missing credential or input aborts before any work)
//! 2. load the trainer skill and, if named, the athlete profile
//! 3. load the export into a [`DataStore`](pierre_core::models::DataStore)
//! 4. assemble the prompt for the reference instant
//! 5. call the model once; a failure ends the run without writing anything
//! 6. write the dated report; if that fails the analysis travels in the error

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pierre_core::errors::{AppError, AppResult};
use pierre_intelligence::assemble_prompt;
use pierre_intelligence::window::resolve_reference;
use tracing::{error, info};

use crate::config::{env_vars, ReportConfig};
use crate::llm::{generate_report, AnthropicProvider, LlmProvider};
use crate::loader::load_store;
use crate::report::write_report;
use crate::skill::{compose_user_message, load_profile, load_skill};

/// Per-invocation options that are not configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Instant the trailing week ends at; now when `None`
    pub reference: Option<DateTime<Utc>>,
    /// Stop after assembling the prompt instead of calling the model
    pub prompt_only: bool,
}

/// Inputs of the model call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPrompt {
    /// Trainer persona
    pub system_instruction: String,
    /// Athlete profile and training data
    pub user_message: String,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The assembled prompt, when the model was not called
    Prompt(PreparedPrompt),
    /// Path of the written report
    Report(PathBuf),
}

/// Load every input and build the model prompt
///
/// # Errors
///
/// Returns an error if the skill, profile, or export cannot be read
pub fn prepare_prompt(
    config: &ReportConfig,
    reference: DateTime<Utc>,
) -> AppResult<PreparedPrompt> {
    let skill = load_skill(&config.skill_path)?;
    let profile = load_profile(&skill)?;

    let store = load_store(&config.data_path)?;
    let training_data = assemble_prompt(&store, Some(reference));
    let user_message = compose_user_message(profile.as_deref(), &training_data);
    info!(chars = user_message.len(), "Prepared prompt");

    Ok(PreparedPrompt {
        system_instruction: skill.instructions,
        user_message,
    })
}

/// Run once against an explicit provider
///
/// # Errors
///
/// Configuration errors abort before any work; a failed model call or report
/// write ends the run with the matching error class
pub async fn run_with_provider(
    config: &ReportConfig,
    options: RunOptions,
    provider: &dyn LlmProvider,
) -> AppResult<RunOutcome> {
    config.validate(!options.prompt_only)?;
    let reference = resolve_reference(options.reference);
    let prompt = prepare_prompt(config, reference)?;
    if options.prompt_only {
        return Ok(RunOutcome::Prompt(prompt));
    }

    info!(provider = provider.display_name(), model = %config.model, "Calling model for analysis");
    let content = generate_report(
        provider,
        &prompt.system_instruction,
        &prompt.user_message,
        &config.model,
        config.max_tokens,
    )
    .await
    .ok_or_else(|| AppError::external_service(provider.display_name(), "Failed to generate report"))?;

    let path = write_report(&config.output_dir, &content, reference.date_naive())
        .map_err(|e| keep_unsaved_analysis(e, &content))?;
    Ok(RunOutcome::Report(path))
}

/// Attach the analysis to a write failure so it still reaches the user
fn keep_unsaved_analysis(e: AppError, content: &str) -> AppError {
    error!(code = ?e.code, chars = content.len(), "Report could not be saved: {e}");
    let AppError { code, mut message } = e;
    message.push_str("\n\nUnsaved analysis:\n\n");
    message.push_str(content);
    AppError::new(code, message)
}

/// Run once against the configured Anthropic endpoint
///
/// # Errors
///
/// See [`run_with_provider`]
pub async fn run(config: &ReportConfig, options: RunOptions) -> AppResult<RunOutcome> {
    if options.prompt_only {
        config.validate(false)?;
        let prompt = prepare_prompt(config, resolve_reference(options.reference))?;
        return Ok(RunOutcome::Prompt(prompt));
    }

    let api_key = config.api_key.clone().ok_or_else(|| {
        AppError::config_missing(format!("{} not set in environment", env_vars::ANTHROPIC_API_KEY))
    })?;
    let provider = AnthropicProvider::with_base_url(api_key, config.api_base_url.as_str())
        .with_default_model(config.model.as_str());
    run_with_provider(config, options, &provider).await
}

// ABOUTME: Run configuration built once at process start from the environment and CLI flags
// ABOUTME: Data source, output directory, trainer skill, API credential, and model settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for a report run
//!
//! A `.env` file in the working directory is honored by the binary before
//! [`ReportConfig::from_env`] runs; command-line flags are applied on top with
//! [`ReportConfig::apply_overrides`].

use std::env;
use std::path::{Path, PathBuf};

use pierre_core::errors::{AppError, AppResult};
use serde::Serialize;
use tracing::debug;

/// Environment variable names
pub mod env_vars {
    /// Export to summarize (markdown document, CSV directory, or zip archive)
    pub const SUMMARY_FILE_PATH: &str = "SUMMARY_FILE_PATH";
    /// Directory receiving the report
    pub const REPORT_OUTPUT_DIR: &str = "REPORT_OUTPUT_DIR";
    /// Trainer persona file used as the system instruction
    pub const PERSONAL_TRAINER_SKILL_PATH: &str = "PERSONAL_TRAINER_SKILL_PATH";
    /// Anthropic API key
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    /// Anthropic API base URL
    pub const ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";
    /// Model identifier
    pub const CLAUDE_MODEL: &str = "CLAUDE_MODEL";
    /// Completion token limit
    pub const CLAUDE_MAX_TOKENS: &str = "CLAUDE_MAX_TOKENS";
}

/// Default values
pub mod defaults {
    /// Default export location
    pub const SUMMARY_FILE_PATH: &str = "/home/dietpi/garmin-reports/garmin_export.md";
    /// Default report directory
    pub const REPORT_OUTPUT_DIR: &str = "/home/dietpi/garmin-reports";
    /// Default trainer persona file
    pub const PERSONAL_TRAINER_SKILL_PATH: &str = "/home/dietpi/garmin-claude-analyzer/SKILL.md";
    /// Default Anthropic API base URL
    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
    /// Default model
    pub const CLAUDE_MODEL: &str = "claude-opus-4-5-20251101";
    /// Default completion token limit
    pub const MAX_TOKENS: u32 = 8000;
}

/// Values given on the command line, each replacing its environment counterpart
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Export to summarize
    pub data_path: Option<PathBuf>,
    /// Report directory
    pub output_dir: Option<PathBuf>,
    /// Trainer persona file
    pub skill_path: Option<PathBuf>,
    /// Model identifier
    pub model: Option<String>,
    /// Completion token limit
    pub max_tokens: Option<u32>,
}

/// Configuration of one report run
#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    /// Export to summarize
    pub data_path: PathBuf,
    /// Report directory
    pub output_dir: PathBuf,
    /// Trainer persona file
    pub skill_path: PathBuf,
    /// Anthropic API key, if configured
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Anthropic API base URL
    pub api_base_url: String,
    /// Model identifier
    pub model: String,
    /// Completion token limit
    pub max_tokens: u32,
}

impl ReportConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `CLAUDE_MAX_TOKENS` is not a positive integer
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `CLAUDE_MAX_TOKENS` is not a positive integer
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let max_tokens = match get(env_vars::CLAUDE_MAX_TOKENS) {
            Some(raw) => parse_max_tokens(&raw)?,
            None => defaults::MAX_TOKENS,
        };

        Ok(Self {
            data_path: get(env_vars::SUMMARY_FILE_PATH)
                .unwrap_or_else(|| defaults::SUMMARY_FILE_PATH.into())
                .into(),
            output_dir: get(env_vars::REPORT_OUTPUT_DIR)
                .unwrap_or_else(|| defaults::REPORT_OUTPUT_DIR.into())
                .into(),
            skill_path: get(env_vars::PERSONAL_TRAINER_SKILL_PATH)
                .unwrap_or_else(|| defaults::PERSONAL_TRAINER_SKILL_PATH.into())
                .into(),
            api_key: get(env_vars::ANTHROPIC_API_KEY),
            api_base_url: get(env_vars::ANTHROPIC_BASE_URL)
                .unwrap_or_else(|| defaults::ANTHROPIC_BASE_URL.into()),
            model: get(env_vars::CLAUDE_MODEL).unwrap_or_else(|| defaults::CLAUDE_MODEL.into()),
            max_tokens,
        })
    }

    /// Replace environment values with the ones given on the command line
    #[must_use]
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(data_path) = overrides.data_path {
            self.data_path = data_path;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(skill_path) = overrides.skill_path {
            self.skill_path = skill_path;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.max_tokens = max_tokens;
        }
        self
    }

    /// Check everything a run needs before any work starts
    ///
    /// The API key is only required when the report model will be called.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing credential or file
    pub fn validate(&self, require_api_key: bool) -> AppResult<()> {
        if require_api_key && self.api_key.is_none() {
            return Err(AppError::config_missing(format!(
                "{} not set in environment; create a .env file with your API key",
                env_vars::ANTHROPIC_API_KEY
            )));
        }
        if self.max_tokens == 0 {
            return Err(AppError::config("max tokens must be greater than zero"));
        }
        require_path("Summary file", &self.data_path)?;
        require_path("Personal trainer skill file", &self.skill_path)?;

        debug!(
            data = %self.data_path.display(),
            output_dir = %self.output_dir.display(),
            model = %self.model,
            "Configuration validated"
        );
        Ok(())
    }
}

fn parse_max_tokens(raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|tokens| *tokens > 0)
        .ok_or_else(|| {
            AppError::config(format!(
                "{} must be a positive integer, got '{raw}'",
                env_vars::CLAUDE_MAX_TOKENS
            ))
        })
}

fn require_path(what: &str, path: &Path) -> AppResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AppError::input_not_found(what, path.display()))
    }
}

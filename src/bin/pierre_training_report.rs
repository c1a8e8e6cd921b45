// ABOUTME: Pierre training report CLI - one run from export to written report
// ABOUTME: Parses flags, loads .env, initializes logging, and maps failures to exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Analyze the configured export and write today's report
//! pierre-training-report
//!
//! # Analyze a zipped CSV export for a past week
//! pierre-training-report --data export.zip --date 2025-03-10
//!
//! # Inspect the prompt without calling the model
//! pierre-training-report --print-prompt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use pierre_core::errors::AppError;
use pierre_intelligence::window::reference_from_date;
use pierre_training_report::config::{ConfigOverrides, ReportConfig};
use pierre_training_report::logging::LoggingConfig;
use pierre_training_report::pipeline::{run, RunOptions, RunOutcome};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pierre-training-report",
    about = "Generate a training report from a fitness-tracker export",
    long_about = "Summarizes the trailing week of a Garmin export (activities, climbing, sleep, recovery) and asks Claude for a daily training report."
)]
struct Cli {
    /// Export to analyze: markdown document, CSV directory, or zip archive
    #[arg(long)]
    data: Option<PathBuf>,

    /// Directory receiving the report
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Personal trainer skill file
    #[arg(long)]
    skill: Option<PathBuf>,

    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Completion token limit
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Reference date (YYYY-MM-DD); the report covers the seven days before it
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the prompt to stdout instead of calling the model
    #[arg(long)]
    print_prompt: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_path: self.data.clone(),
            output_dir: self.output_dir.clone(),
            skill_path: self.skill.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

fn failure(e: &AppError) -> ExitCode {
    eprintln!("Error: {e}");
    ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();

    if let Err(e) = LoggingConfig::from_env().verbose(cli.verbose).init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = match ReportConfig::from_env() {
        Ok(config) => config.apply_overrides(cli.overrides()),
        Err(e) => return failure(&e),
    };

    let options = RunOptions {
        reference: cli.date.map(reference_from_date),
        prompt_only: cli.print_prompt,
    };

    match run(&config, options).await {
        Ok(RunOutcome::Prompt(prompt)) => {
            println!("{}", prompt.user_message);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Report(path)) => {
            info!(path = %path.display(), "Report generated successfully");
            ExitCode::SUCCESS
        }
        Err(e) => failure(&e),
    }
}

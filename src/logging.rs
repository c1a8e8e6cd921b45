// ABOUTME: Logging configuration and structured logging setup for the report pipeline
// ABOUTME: Configures log level, format, and location output; logs go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging for a single-shot batch run
//!
//! Logs are written to stderr so that stdout carries nothing but the prompt
//! when the binary runs with `--print-prompt`.

use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crate name used for the application log directive
const APP_TARGET: &str = "pierre_training_report";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for log shipping
    Json,
    /// Pretty format for interactive runs
    Pretty,
    /// Compact format for cron mail and small terminals
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
            include_location: false,
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };

        Self {
            level,
            format,
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    /// Force debug-level output for the application crates
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.level = "debug".into();
        }
        self
    }

    /// Application-crate directive, only when `level` is a bare level
    ///
    /// A full directive list in `RUST_LOG` is used as given.
    fn app_directive(&self) -> Option<Directive> {
        let level = self.level.trim();
        level.parse::<LevelFilter>().ok()?;
        format!("{APP_TARGET}={level}").parse().ok()
    }

    fn env_filter(&self) -> EnvFilter {
        let filter = EnvFilter::new(&self.level)
            // Always apply noise reduction regardless of RUST_LOG setting
            .add_directive(
                "hyper=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "reqwest=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            );
        match self.app_directive() {
            Some(directive) => filter.add_directive(directive),
            None => filter,
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(false)
                    .with_writer(io::stderr);
                registry.with(compact_layer).try_init()?;
            }
        }

        info!(
            service.version = %self.service_version,
            log.level = %self.level,
            log.format = ?self.format,
            "Pierre training report starting"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig::default().verbose(true);
        assert_eq!(config.level, "debug");
        assert_eq!(LoggingConfig::default().verbose(false).level, "info");
    }

    #[test]
    fn test_bare_level_adds_app_directive() {
        let config = LoggingConfig::default().verbose(true);
        assert_eq!(
            config.app_directive().as_ref().map(ToString::to_string),
            Some(format!("{APP_TARGET}=debug"))
        );
    }

    #[test]
    fn test_directive_list_is_used_as_given() {
        let config = LoggingConfig {
            level: format!("warn,{APP_TARGET}=trace"),
            ..LoggingConfig::default()
        };
        assert!(config.app_directive().is_none());

        let rendered = config.env_filter().to_string();
        let directives: Vec<&str> = rendered.split(',').collect();
        assert!(directives.contains(&"warn"));
        assert!(directives.contains(&format!("{APP_TARGET}=trace").as_str()));
        assert!(!directives.contains(&"info"));
    }
}

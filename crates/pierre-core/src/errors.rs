// ABOUTME: Unified error handling for the training report pipeline
// ABOUTME: Error codes grouped by failure class, each mapped to a process exit status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every failure in a run is an [`AppError`] carrying an [`ErrorCode`]. Codes are
//! grouped into an [`ErrorClass`] that decides how the run reacts:
//!
//! - **Configuration**: fatal before any work begins
//! - **Data**: degrade gracefully, the affected section is omitted
//! - **Collaborator**: the text-generation call failed, no report is written
//! - **Output**: the report could not be persisted
//! - **Internal**: anything else

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Configuration (1000-1999)
    /// A required setting (credential, path) is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 1000,
    /// A setting is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 1001,
    /// A required input file does not exist
    #[serde(rename = "INPUT_NOT_FOUND")]
    InputNotFound = 1002,
    /// A required input file exists but cannot be read
    #[serde(rename = "INPUT_UNREADABLE")]
    InputUnreadable = 1003,

    // Data (2000-2999)
    /// Input content is malformed
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 2000,

    // External Services (3000-3999)
    /// The text-generation service returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 3000,
    /// The text-generation service rejected the credential
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 3001,
    /// The text-generation service rate-limited or exhausted quota
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 3002,

    // Output (4000-4999)
    /// Writing an output file failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 4000,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

/// How a run reacts to an error of a given code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Missing credential or input; the run aborts before doing any work
    Configuration,
    /// Malformed or missing data; the affected section degrades
    Data,
    /// Text-generation failure; the run fails without writing output
    Collaborator,
    /// Report persistence failure
    Output,
    /// Anything not covered above
    Internal,
}

impl ErrorCode {
    /// Failure class for this code
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::InputNotFound
            | Self::InputUnreadable => ErrorClass::Configuration,
            Self::InvalidFormat => ErrorClass::Data,
            Self::ExternalServiceError | Self::ExternalAuthFailed | Self::ExternalRateLimited => {
                ErrorClass::Collaborator
            }
            Self::StorageError => ErrorClass::Output,
            Self::InternalError => ErrorClass::Internal,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ConfigMissing => "A required configuration value is missing",
            Self::ConfigInvalid => "A configuration value is invalid",
            Self::InputNotFound => "A required input file was not found",
            Self::InputUnreadable => "A required input file could not be read",
            Self::InvalidFormat => "The input data format is invalid",
            Self::ExternalServiceError => "The text-generation service returned an error",
            Self::ExternalAuthFailed => "Authentication with the text-generation service failed",
            Self::ExternalRateLimited => "The text-generation service rate limit was exceeded",
            Self::StorageError => "A file could not be written",
            Self::InternalError => "An internal error occurred",
        }
    }
}

impl ErrorClass {
    /// Process exit status for a run that fails with this class
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration => 2,
            Self::Collaborator => 3,
            Self::Output => 4,
            Self::Data | Self::Internal => 1,
        }
    }
}

/// Main application error type
#[derive(Debug, Clone, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error with a code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Failure class of this error
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        self.code.class()
    }

    /// Process exit status for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.code.class().exit_code()
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Missing configuration value
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Required input file not found
    #[must_use]
    pub fn input_not_found(what: &str, path: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InputNotFound, format!("{what} not found: {path}"))
    }

    /// Required input file could not be read
    #[must_use]
    pub fn input_unreadable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputUnreadable, message)
    }

    /// Malformed input data
    #[must_use]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Output write failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service rejected the credential
    #[must_use]
    pub fn external_auth(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalAuthFailed,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service rate limited the request
    #[must_use]
    pub fn external_rate_limited(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalRateLimited,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_classes() {
        assert_eq!(ErrorCode::ConfigMissing.class(), ErrorClass::Configuration);
        assert_eq!(ErrorCode::InputNotFound.class(), ErrorClass::Configuration);
        assert_eq!(ErrorCode::InputUnreadable.class(), ErrorClass::Configuration);
        assert_eq!(ErrorCode::InvalidFormat.class(), ErrorClass::Data);
        assert_eq!(ErrorCode::ExternalAuthFailed.class(), ErrorClass::Collaborator);
        assert_eq!(ErrorCode::StorageError.class(), ErrorClass::Output);
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        for class in [
            ErrorClass::Configuration,
            ErrorClass::Data,
            ErrorClass::Collaborator,
            ErrorClass::Output,
            ErrorClass::Internal,
        ] {
            assert_ne!(class.exit_code(), 0);
        }
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::input_not_found("Summary file", "/tmp/missing.md");
        let text = error.to_string();
        assert!(text.starts_with("A required input file was not found"));
        assert!(text.contains("/tmp/missing.md"));
    }

    #[test]
    fn test_external_service_prefixes_service() {
        let error = AppError::external_rate_limited("Anthropic", "slow down");
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert_eq!(error.message, "Anthropic: slow down");
    }
}

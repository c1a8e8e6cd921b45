// ABOUTME: Anthropic Messages API provider for the report-writing model
// ABOUTME: Single non-streaming request with status-specific error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Anthropic Provider
//!
//! Implementation of the `LlmProvider` trait for the Anthropic Messages API.
//!
//! ## Configuration
//!
//! Set the `ANTHROPIC_API_KEY` environment variable. `ANTHROPIC_BASE_URL`
//! points the provider at another host (a proxy or a local test server).

use async_trait::async_trait;
use pierre_core::errors::AppError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, MessageRole, TokenUsage};
use crate::config::defaults;

/// Service name used in error messages
const SERVICE: &str = "Anthropic";

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages endpoint, relative to the base URL
const MESSAGES_ENDPOINT: &str = "v1/messages";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Messages API request structure
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

/// Message structure for the Messages API
#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for AnthropicMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// Messages API response structure
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
    model: String,
    stop_reason: Option<String>,
    usage: Option<AnthropicUsage>,
}

/// Content block in a response
#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Usage statistics in a response
#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Error response body
#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic Claude provider
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl AnthropicProvider {
    /// Create a provider for the public API
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, defaults::ANTHROPIC_BASE_URL)
    }

    /// Create a provider talking to `base_url` instead of the public API
    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            default_model: defaults::CLAUDE_MODEL.to_owned(),
        }
    }

    /// Use `model` when a request does not name one
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Split internal messages into the system instruction and the conversation
    fn convert_messages(messages: &[ChatMessage]) -> (Option<String>, Vec<AnthropicMessage>) {
        let system: Vec<&str> = messages
            .iter()
            .filter(|msg| msg.role == MessageRole::System)
            .map(|msg| msg.content.as_str())
            .collect();
        let conversation = messages
            .iter()
            .filter(|msg| msg.role != MessageRole::System)
            .map(AnthropicMessage::from)
            .collect();
        let system = (!system.is_empty()).then(|| system.join("\n\n"));
        (system, conversation)
    }

    /// Parse error response from the Messages API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<AnthropicErrorResponse>(body).map_or_else(
            |_| {
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                )
            },
            |response| {
                format!(
                    "{} - {}",
                    response
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_owned()),
                    response.error.message
                )
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::external_auth(SERVICE, format!("Authentication failed: {detail}")),
            429 => AppError::external_rate_limited(SERVICE, format!("Rate limit exceeded: {detail}")),
            _ => AppError::external_service(SERVICE, detail),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn display_name(&self) -> &'static str {
        "Anthropic Claude"
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let (system, messages) = Self::convert_messages(&request.messages);

        debug!("Sending messages request to Anthropic");

        let anthropic_request = AnthropicRequest {
            model: model.to_owned(),
            max_tokens: request.max_tokens.unwrap_or(defaults::MAX_TOKENS),
            system,
            messages,
        };

        let response = self
            .client
            .post(self.api_url(MESSAGES_ENDPOINT))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Anthropic API: {}", e);
                AppError::external_service(SERVICE, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read Anthropic API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let anthropic_response: AnthropicResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse Anthropic API response: {}", e);
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let content: String = anthropic_response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect();

        debug!(
            "Received response from Anthropic: {} chars, stop_reason: {:?}",
            content.len(),
            anthropic_response.stop_reason
        );

        Ok(ChatResponse {
            content,
            model: anthropic_response.model,
            usage: anthropic_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            }),
            finish_reason: anthropic_response.stop_reason,
        })
    }
}

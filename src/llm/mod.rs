// ABOUTME: LLM provider abstraction for the report-writing model
// ABOUTME: Defines the provider contract and the failure-isolating report generation call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Service Provider Interface
//!
//! The report is written by a single chat completion: one system instruction
//! (the trainer persona) and one user message (profile plus training data).
//!
//! ## Key Concepts
//!
//! - **`LlmProvider`**: Async trait for chat completion
//! - **`ChatMessage`**: Role-based message structure for conversations
//! - **`ChatRequest`**: Request configuration including model and token limit
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use pierre_training_report::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a climbing coach."),
//!         ChatMessage::user("Summarize my week."),
//!     ]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod anthropic;

pub use anthropic::AnthropicProvider;

use async_trait::async_trait;
use pierre_core::errors::AppError;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            max_tokens: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (`end_turn`, `max_tokens`, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Perform a chat completion (single request, no retry)
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

/// Ask the provider for the report
///
/// Failures of the provider (network, authentication, quota) and empty
/// completions are logged and turned into `None`; they never propagate to the caller.
pub async fn generate_report(
    provider: &dyn LlmProvider,
    system_instruction: &str,
    user_message: &str,
    model: &str,
    max_tokens: u32,
) -> Option<String> {
    let request = ChatRequest::new(vec![
        ChatMessage::system(system_instruction),
        ChatMessage::user(user_message),
    ])
    .with_model(model)
    .with_max_tokens(max_tokens);

    match provider.complete(&request).await {
        Ok(response) if response.content.trim().is_empty() => {
            error!(
                provider = provider.display_name(),
                finish_reason = ?response.finish_reason,
                "Report generation returned no text"
            );
            None
        }
        Ok(response) => {
            info!(
                provider = provider.display_name(),
                model = %response.model,
                chars = response.content.len(),
                output_tokens = response.usage.map(|usage| usage.completion_tokens),
                "Received analysis"
            );
            Some(response.content)
        }
        Err(e) => {
            error!(provider = provider.display_name(), code = ?e.code, "Report generation failed: {e}");
            None
        }
    }
}

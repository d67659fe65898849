// ABOUTME: LLM provider abstraction for the AI-backed exercise selector and plan generator
// ABOUTME: Chat message types, provider capability flags, and the async LlmProvider contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Providers
//!
//! The AI selectors send one system prompt and one user prompt and expect a
//! single JSON document back. Everything here serves that exchange:
//!
//! - **`LlmCapabilities`**: what a host can honour (JSON mode, system role)
//! - **`ChatRequest`**: messages plus sampling settings
//! - **`LlmProvider`**: async trait implemented by [`OpenAiCompatibleProvider`]
//!   and by test doubles
//!
//! ```rust,no_run
//! use fitcoach_engine::llm::{provider_from_env, ChatRequest};
//!
//! # async fn example() -> Result<(), fitcoach_engine::errors::AppError> {
//! let provider = provider_from_env()?;
//! let request = ChatRequest::from_prompts(
//!     provider.capabilities(),
//!     "Voce e um personal trainer.",
//!     "Sugira um aquecimento em JSON.".to_owned(),
//! )
//! .with_json_mode();
//! let response = provider.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

mod openai_compatible;
pub mod prompts;
mod provider;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use provider::{create_provider, provider_from_env};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

bitflags::bitflags! {
    /// Features an LLM host supports
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Honours `response_format: json_object`
        const JSON_MODE = 0b0000_0001;
        /// Accepts a separate system role message
        const SYSTEM_MESSAGES = 0b0000_0010;
    }
}

impl LlmCapabilities {
    /// Hosted chat-completions APIs (`OpenAI`, Groq)
    #[must_use]
    pub const fn hosted() -> Self {
        Self::JSON_MODE.union(Self::SYSTEM_MESSAGES)
    }

    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// Check if system messages are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions for the model
    System,
    /// Prompt content
    User,
}

impl MessageRole {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender role
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model override, the provider default when `None`
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completion token budget
    pub max_tokens: Option<u32>,
    /// Ask the provider to constrain output to a JSON object
    pub json_mode: bool,
}

impl ChatRequest {
    /// Create a request from raw messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    /// System plus user prompt, merged into one user message when the host
    /// has no system role
    #[must_use]
    pub fn from_prompts(capabilities: LlmCapabilities, system: &str, user: String) -> Self {
        let messages = if capabilities.supports_system_messages() {
            vec![ChatMessage::system(system), ChatMessage::user(user)]
        } else {
            vec![ChatMessage::user(format!("{system}\n\n{user}"))]
        };
        Self::new(messages)
    }

    /// Set the model when one is configured
    #[must_use]
    pub fn with_model(mut self, model: Option<&str>) -> Self {
        if let Some(model) = model {
            self.model = Some(model.to_owned());
        }
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token budget
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request JSON object output
    #[must_use]
    pub const fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text, empty when the host returned none
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Token accounting, when reported
    pub usage: Option<TokenUsage>,
    /// Why generation stopped (`stop`, `length`, ...)
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Whether the answer was cut off by the token budget
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

/// Chat completion backend for the AI selectors
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identifier for logs (`openai`, `groq`, `ollama`, ...)
    fn name(&self) -> &'static str;

    /// Human-readable name used in error messages
    fn display_name(&self) -> &'static str;

    /// Supported features
    fn capabilities(&self) -> LlmCapabilities;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

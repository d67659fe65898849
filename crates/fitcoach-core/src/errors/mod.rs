// ABOUTME: Error codes and the AppError type for the LLM transport and configuration seams
// ABOUTME: The suggestion pipeline recovers every AppError locally; hosts see them only from the llm module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Errors
//!
//! Suggestion and plan generation never fail towards the caller: a broken
//! provider call ends in the rule-based fallback. [`AppError`] therefore only
//! crosses the public API where a host talks to the `llm` module directly
//! (building a provider, calling `complete`).

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request sent upstream was rejected as malformed
    InvalidInput,
    /// Model or endpoint does not exist
    ResourceNotFound,
    /// An upstream service returned an error
    ExternalServiceError,
    /// An upstream service could not be reached or is overloaded
    ExternalServiceUnavailable,
    /// Credentials were rejected by an upstream service
    ExternalAuthFailed,
    /// An upstream service rate limited the request
    ExternalRateLimited,
    /// A required environment variable is missing
    ConfigMissing,
    /// A configuration value could not be used
    ConfigInvalid,
    /// Unexpected internal failure
    InternalError,
    /// JSON encoding or decoding failed
    SerializationError,
}

impl ErrorCode {
    /// Short description used as the display prefix
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid request",
            Self::ResourceNotFound => "Resource not found",
            Self::ExternalServiceError => "External service error",
            Self::ExternalServiceUnavailable => "External service unavailable",
            Self::ExternalAuthFailed => "External authentication failed",
            Self::ExternalRateLimited => "External rate limit exceeded",
            Self::ConfigMissing => "Missing configuration",
            Self::ConfigInvalid => "Invalid configuration",
            Self::InternalError => "Internal error",
            Self::SerializationError => "Serialization error",
        }
    }

    /// Whether retrying the same call later could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceUnavailable | Self::ExternalRateLimited
        )
    }
}

/// Error raised by the LLM transport and configuration layers
#[derive(Debug, Error)]
#[error("{}: {message}", code.description())]
pub struct AppError {
    /// Category
    pub code: ErrorCode,
    /// Human-readable detail
    pub message: String,
    /// Underlying cause
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create an error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Upstream rejected the request payload
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Upstream does not know the model or endpoint
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Required environment variable is unset or empty
    #[must_use]
    pub fn config_missing(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{key} environment variable not set"),
        )
    }

    /// Internal failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Upstream failure, prefixed with the service name
    #[must_use]
    pub fn external_service(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {}", message.into()),
        )
    }

    /// Whether retrying the same call later could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.code.is_transient()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result alias for the transport layer
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_description() {
        let error = AppError::external_service("Groq", "upstream exploded");
        assert_eq!(
            error.to_string(),
            "External service error: Groq: upstream exploded"
        );
        assert!(!error.is_transient());
    }

    #[test]
    fn test_transient_codes() {
        assert!(ErrorCode::ExternalRateLimited.is_transient());
        assert!(ErrorCode::ExternalServiceUnavailable.is_transient());
        assert!(!AppError::config_missing("OPENAI_API_KEY").is_transient());
    }

    #[test]
    fn test_code_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::ExternalRateLimited).unwrap();
        assert_eq!(json, "\"EXTERNAL_RATE_LIMITED\"");
    }

    #[test]
    fn test_serde_error_conversion_keeps_source() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(StdError::source(&error).is_some());
    }
}

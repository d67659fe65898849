// ABOUTME: Configuration management module for the suggestion engine
// ABOUTME: Environment-driven engine settings plus shared logging and LLM selection types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All configuration is read from environment variables:
//!
//! - **Engine**: AI toggle, timeout, prompt caps, sampling, RNG seed (`FITCOACH_*`)
//! - **Types**: deployment environment and LLM provider selection

/// Suggestion and plan engine settings
pub mod engine;
/// Shared configuration enums
pub mod types;

pub use engine::SuggestionEngineConfig;
pub use types::{Environment, LlmProviderType};

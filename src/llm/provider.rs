// ABOUTME: Runtime LLM provider selection from FITCOACH_LLM_PROVIDER
// ABOUTME: Builds the OpenAI, Groq, or local OpenAI-compatible provider behind an Arc<dyn LlmProvider>
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::info;

use super::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::config::LlmProviderType;
use crate::errors::AppError;

/// Create a provider of the given type from its environment variables
///
/// # Errors
///
/// Returns `ConfigMissing` if a hosted provider has no API key, or an
/// internal error if the HTTP client cannot be built.
pub fn create_provider(provider_type: LlmProviderType) -> Result<Arc<dyn LlmProvider>, AppError> {
    let config = OpenAiCompatibleConfig::from_env(provider_type)?;
    Ok(Arc::new(OpenAiCompatibleProvider::new(config)?))
}

/// Create the provider selected by `FITCOACH_LLM_PROVIDER` (default `openai`)
///
/// # Errors
///
/// Returns an error if the selected provider cannot be configured.
pub fn provider_from_env() -> Result<Arc<dyn LlmProvider>, AppError> {
    let provider_type = LlmProviderType::from_env();
    info!(
        provider = %provider_type,
        "Selecting LLM provider (set {} to change)",
        LlmProviderType::ENV_VAR
    );
    create_provider(provider_type)
}

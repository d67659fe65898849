// ABOUTME: AI-backed exercise selector that delegates choice and technique assignment to an LLM
// ABOUTME: Builds the prompt, enforces the call timeout, parses JSON, and validates against the pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::config::SuggestionEngineConfig;
use crate::llm::prompts::suggestion_system_prompt;
use crate::llm::{ChatRequest, LlmProvider};
use crate::models::{ExerciseCandidate, SuggestionRequest};

use super::generator::{DraftSuggestions, ExercisePlanGenerator, GenerationError, GoalProfile};
use super::prompt::build_suggestion_prompt;
use super::response::{parse_draft, validate_items, OrphanPolicy};

/// Exercise selector backed by a chat completion provider
pub struct LlmExerciseGenerator {
    provider: Arc<dyn LlmProvider>,
    config: SuggestionEngineConfig,
}

impl LlmExerciseGenerator {
    /// Create a selector using `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: SuggestionEngineConfig) -> Self {
        Self { provider, config }
    }

    fn chat_request(&self, prompt: String) -> ChatRequest {
        ChatRequest::from_prompts(
            self.provider.capabilities(),
            suggestion_system_prompt(),
            prompt,
        )
        .with_model(self.config.model.as_deref())
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens)
        .with_json_mode()
    }
}

#[async_trait]
impl ExercisePlanGenerator for LlmExerciseGenerator {
    fn name(&self) -> &'static str {
        "llm"
    }

    #[instrument(skip(self, candidates, request), fields(provider = self.provider.name(), candidates = candidates.len()))]
    async fn draft(
        &self,
        candidates: &[ExerciseCandidate],
        request: &SuggestionRequest,
    ) -> Result<DraftSuggestions, GenerationError> {
        let prompt = build_suggestion_prompt(candidates, request, self.config.candidate_limit);
        let chat_request = self.chat_request(prompt);

        let response = timeout(self.config.ai_timeout, self.provider.complete(&chat_request))
            .await
            .map_err(|_| GenerationError::Timeout(self.config.ai_timeout))?
            .map_err(GenerationError::Transport)?;

        if response.content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        let raw = parse_draft(&response.content)?;
        let profile = GoalProfile::for_goal(request.goal);
        let items = validate_items(
            raw.suggestions,
            candidates,
            request.technique_whitelist(),
            &profile.prescription(),
            OrphanPolicy::Adopt,
        );

        if items.is_empty() {
            return Err(GenerationError::InvalidResponse(
                "no suggestion referenced a known exercise".to_owned(),
            ));
        }

        debug!(items = items.len(), model = %response.model, "LLM draft accepted");

        Ok(DraftSuggestions {
            items,
            message: raw
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| profile.message.to_owned()),
        })
    }
}

// ABOUTME: Suggestion pipeline orchestrator running filter, selection, repair, variety, and ordering
// ABOUTME: Tries the AI-backed selector first and falls back to the rule-based one on any failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::SuggestionEngineConfig;
use crate::constants::messages::NO_MATCHING_EXERCISES;
use crate::llm::{provider_from_env, LlmProvider};
use crate::logging::EngineLogger;
use crate::models::{ExerciseCandidate, SuggestionItem, SuggestionRequest, SuggestionResult};

use super::ai_selector::LlmExerciseGenerator;
use super::filter::filter_candidates;
use super::generator::{DraftSuggestions, ExercisePlanGenerator, GoalProfile};
use super::orderer::order_suggestions;
use super::pool::UnusedPool;
use super::repair::repair_groups;
use super::rule_selector::RuleBasedGenerator;
use super::variety::ensure_variety;

const PIPELINE: &str = "suggestions";

/// Entry point for exercise suggestions
///
/// Never fails: a missing or failing AI selector is replaced by the
/// rule-based one, and an empty pool yields an empty result with a message.
pub struct SuggestionService {
    primary: Option<Arc<dyn ExercisePlanGenerator>>,
    fallback: RuleBasedGenerator,
}

impl SuggestionService {
    /// Service using `provider` for AI selection
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: &SuggestionEngineConfig) -> Self {
        Self {
            primary: Some(Arc::new(LlmExerciseGenerator::new(provider, config.clone()))),
            fallback: RuleBasedGenerator::from_config(config),
        }
    }

    /// Service that never calls an LLM
    #[must_use]
    pub fn rule_based_only() -> Self {
        Self::with_generators(None, RuleBasedGenerator::new())
    }

    /// Service built from engine configuration and provider environment
    ///
    /// A missing provider configuration downgrades to rule-based selection.
    #[must_use]
    pub fn from_config(config: &SuggestionEngineConfig) -> Self {
        if !config.ai_enabled {
            info!("AI selection disabled, using rule-based suggestions");
            return Self::with_generators(None, RuleBasedGenerator::from_config(config));
        }
        match provider_from_env() {
            Ok(provider) => {
                info!(provider = provider.name(), "AI selection enabled");
                Self::new(provider, config)
            }
            Err(e) => {
                warn!(error = %e, "LLM provider unavailable, using rule-based suggestions");
                Self::with_generators(None, RuleBasedGenerator::from_config(config))
            }
        }
    }

    /// Service with explicit generators
    #[must_use]
    pub fn with_generators(
        primary: Option<Arc<dyn ExercisePlanGenerator>>,
        fallback: RuleBasedGenerator,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Whether an AI-backed selector is configured
    #[must_use]
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    async fn draft(
        &self,
        candidates: &[ExerciseCandidate],
        request: &SuggestionRequest,
    ) -> (DraftSuggestions, &'static str) {
        if let Some(primary) = &self.primary {
            match primary.draft(candidates, request).await {
                Ok(draft) => return (draft, primary.name()),
                Err(e) => EngineLogger::log_generator_fallback(PIPELINE, primary.name(), &e),
            }
        }
        (self.fallback.generate(candidates, request), self.fallback.name())
    }

    /// Suggest exercises from `pool` for `request`
    #[instrument(skip_all, fields(muscles = ?request.muscle_groups, goal = %request.goal, count = request.count))]
    pub async fn suggest(
        &self,
        pool: &[ExerciseCandidate],
        request: &SuggestionRequest,
    ) -> SuggestionResult {
        let candidates = filter_candidates(pool, &request.muscle_groups, &request.exclude_ids);
        if candidates.is_empty() {
            info!("No candidate exercises matched the requested muscle groups");
            return SuggestionResult::empty(NO_MATCHING_EXERCISES);
        }

        let (draft, generator) = self.draft(&candidates, request).await;
        let whitelist = request.technique_whitelist();
        let mut unused = UnusedPool::new(&candidates, &draft.items)
            .excluding_names(&request.existing_exercise_names());

        let repaired = repair_groups(draft.items, &mut unused, whitelist);
        let prescription = GoalProfile::for_goal(request.goal).prescription();
        let varied = ensure_variety(
            repaired,
            &mut unused,
            whitelist,
            &request.muscle_groups,
            &prescription,
        );
        let suggestions = order_suggestions(varied);

        EngineLogger::log_pipeline_summary(
            PIPELINE,
            generator,
            request.clamped_count(),
            suggestions.len(),
            group_count(&suggestions),
        );

        SuggestionResult {
            suggestions,
            message: draft.message,
        }
    }
}

fn group_count(items: &[SuggestionItem]) -> usize {
    items
        .iter()
        .filter_map(|item| item.group_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

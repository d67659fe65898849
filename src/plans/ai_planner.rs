// ABOUTME: LLM-backed training plan generator with per-workout validation against the pool
// ABOUTME: Parses the plan JSON, demotes orphan groups, infers target muscles, repairs and orders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::config::SuggestionEngineConfig;
use crate::llm::prompts::plan_system_prompt;
use crate::llm::{ChatRequest, LlmProvider};
use crate::models::{ExerciseCandidate, GeneratedPlan, PlanRequest, PlannedWorkout, Prescription, SplitType};
use crate::suggestions::response::{strip_code_fences, validate_items, OrphanPolicy, RawItem};
use crate::suggestions::GenerationError;

use super::prompt::build_plan_prompt;
use super::rule_based::{finish_workout, plan_shell};
use super::TrainingPlanGenerator;

#[derive(Debug, Deserialize)]
struct RawWorkout {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    target_muscles: Vec<String>,
    #[serde(default)]
    exercises: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    workouts: Vec<RawWorkout>,
    #[serde(default)]
    message: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn workout_label(order: usize) -> String {
    u8::try_from(order)
        .ok()
        .filter(|n| *n < 26)
        .map_or_else(|| (order + 1).to_string(), |n| char::from(b'A' + n).to_string())
}

/// Plan generator backed by a chat completion provider
pub struct LlmPlanGenerator {
    provider: Arc<dyn LlmProvider>,
    config: SuggestionEngineConfig,
}

impl LlmPlanGenerator {
    /// Create a plan generator using `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: SuggestionEngineConfig) -> Self {
        Self { provider, config }
    }

    fn validate_workout(
        order: usize,
        raw: RawWorkout,
        candidates: &[ExerciseCandidate],
    ) -> PlannedWorkout {
        let defaults = Prescription::new(3, "10-12", 60);
        let items = validate_items(raw.exercises, candidates, None, &defaults, OrphanPolicy::Demote);

        let target_muscles = if raw.target_muscles.is_empty() {
            let mut inferred: Vec<String> = Vec::new();
            for item in &items {
                let muscle = item.muscle_group.to_lowercase();
                if !inferred.contains(&muscle) {
                    inferred.push(muscle);
                }
            }
            inferred
        } else {
            raw.target_muscles
        };

        let label = non_blank(raw.label).unwrap_or_else(|| workout_label(order));
        PlannedWorkout {
            name: non_blank(raw.name).unwrap_or_else(|| format!("Treino {label}")),
            label,
            order,
            target_muscles,
            exercises: finish_workout(items, candidates),
        }
    }

    fn validate_plan(
        raw: RawPlan,
        candidates: &[ExerciseCandidate],
        request: &PlanRequest,
    ) -> Result<GeneratedPlan, GenerationError> {
        let workouts: Vec<PlannedWorkout> = raw
            .workouts
            .into_iter()
            .enumerate()
            .map(|(order, workout)| Self::validate_workout(order, workout, candidates))
            .collect();

        if workouts.iter().all(|w| w.exercises.is_empty()) {
            return Err(GenerationError::InvalidResponse(
                "no workout referenced a known exercise".to_owned(),
            ));
        }

        let shell = plan_shell(request, SplitType::for_days(request.days_per_week), workouts);
        Ok(GeneratedPlan {
            name: non_blank(raw.name).unwrap_or(shell.name),
            description: non_blank(raw.description).unwrap_or(shell.description),
            message: non_blank(raw.message).unwrap_or(shell.message),
            ..shell
        })
    }
}

#[async_trait]
impl TrainingPlanGenerator for LlmPlanGenerator {
    fn name(&self) -> &'static str {
        "llm"
    }

    #[instrument(skip(self, pool, request), fields(provider = self.provider.name(), days = request.days_per_week))]
    async fn generate_plan(
        &self,
        pool: &[ExerciseCandidate],
        request: &PlanRequest,
    ) -> Result<GeneratedPlan, GenerationError> {
        let prompt = build_plan_prompt(pool, request, self.config.plan_candidate_limit);
        let chat_request =
            ChatRequest::from_prompts(self.provider.capabilities(), plan_system_prompt(), prompt)
                .with_model(self.config.model.as_deref())
                .with_temperature(self.config.plan_temperature)
                .with_max_tokens(self.config.plan_max_tokens)
                .with_json_mode();

        let response = timeout(self.config.ai_timeout, self.provider.complete(&chat_request))
            .await
            .map_err(|_| GenerationError::Timeout(self.config.ai_timeout))?
            .map_err(GenerationError::Transport)?;

        if response.is_truncated() {
            warn!(
                max_tokens = self.config.plan_max_tokens,
                "LLM plan hit the token budget, JSON is likely incomplete"
            );
        }
        let body = strip_code_fences(&response.content);
        if body.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        let raw: RawPlan = serde_json::from_str(body)?;
        debug!(workouts = raw.workouts.len(), model = %response.model, "LLM plan received");

        Self::validate_plan(raw, pool, request)
    }
}

// ABOUTME: Multi-workout training plan generation with AI-first and rule-based fallback
// ABOUTME: Defines the plan generator trait and the service that picks between implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::config::SuggestionEngineConfig;
use crate::llm::{provider_from_env, LlmProvider};
use crate::logging::EngineLogger;
use crate::models::{ExerciseCandidate, GeneratedPlan, PlanRequest};
use crate::suggestions::GenerationError;

/// LLM-backed plan generator
pub mod ai_planner;
/// Equipment and injury filtering
pub mod filter;
/// Plan prompt construction
pub mod prompt;
/// Rule-based plan generator
pub mod rule_based;
/// Split structures and muscle mapping
pub mod split;

pub use ai_planner::LlmPlanGenerator;
pub use rule_based::PlanGenerator;

const PIPELINE: &str = "plans";

/// Something that can produce a full training plan
#[async_trait]
pub trait TrainingPlanGenerator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Generate a plan from the caller's exercise pool
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the plan could not be produced.
    async fn generate_plan(
        &self,
        pool: &[ExerciseCandidate],
        request: &PlanRequest,
    ) -> Result<GeneratedPlan, GenerationError>;
}

/// Plan entry point: AI first, rules on any failure
pub struct PlanService {
    primary: Option<Arc<dyn TrainingPlanGenerator>>,
    fallback: PlanGenerator,
}

impl PlanService {
    /// Service using `provider` for AI plans
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: &SuggestionEngineConfig) -> Self {
        Self {
            primary: Some(Arc::new(LlmPlanGenerator::new(provider, config.clone()))),
            fallback: PlanGenerator::from_config(config),
        }
    }

    /// Service that never calls an LLM
    #[must_use]
    pub fn rule_based_only() -> Self {
        Self::with_generators(None, PlanGenerator::new())
    }

    /// Service from engine configuration and provider environment
    #[must_use]
    pub fn from_config(config: &SuggestionEngineConfig) -> Self {
        if !config.ai_enabled {
            return Self::with_generators(None, PlanGenerator::from_config(config));
        }
        match provider_from_env() {
            Ok(provider) => {
                info!(provider = provider.name(), "AI plan generation enabled");
                Self::new(provider, config)
            }
            Err(e) => {
                warn!(error = %e, "LLM provider unavailable, using rule-based plans");
                Self::with_generators(None, PlanGenerator::from_config(config))
            }
        }
    }

    /// Service with explicit generators
    #[must_use]
    pub fn with_generators(
        primary: Option<Arc<dyn TrainingPlanGenerator>>,
        fallback: PlanGenerator,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Generate a plan, never failing
    #[instrument(skip_all, fields(goal = %request.goal, days = request.days_per_week))]
    pub async fn generate(&self, pool: &[ExerciseCandidate], request: &PlanRequest) -> GeneratedPlan {
        if let Some(primary) = &self.primary {
            match primary.generate_plan(pool, request).await {
                Ok(plan) => {
                    info!(generator = primary.name(), workouts = plan.workouts.len(), "Plan generated");
                    return plan;
                }
                Err(e) => EngineLogger::log_generator_fallback(PIPELINE, primary.name(), &e),
            }
        }
        let plan = self.fallback.generate(pool, request);
        info!(generator = "rule_based", workouts = plan.workouts.len(), "Plan generated");
        plan
    }
}

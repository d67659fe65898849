// ABOUTME: Exercise generator contract shared by the AI-backed and rule-based selectors
// ABOUTME: Defines draft output, generation errors, and the goal prescription lookup table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::AppError;
use crate::models::{ExerciseCandidate, Prescription, SuggestionItem, SuggestionRequest, WorkoutGoal};

// ============================================================================
// Errors
// ============================================================================

/// Failure of a primary generator
///
/// Always recovered by the caller, which switches to the rule-based selector.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No LLM provider is configured
    #[error("AI generation is not configured")]
    Unavailable,
    /// The provider call failed
    #[error("LLM request failed: {0}")]
    Transport(#[source] AppError),
    /// The provider did not answer in time
    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),
    /// The provider returned no content
    #[error("LLM returned an empty response")]
    EmptyResponse,
    /// The response body is not the expected JSON document
    #[error("LLM response is not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    /// The JSON parsed but carried nothing usable
    #[error("LLM response failed validation: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Short machine-readable label for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }

    /// Whether the same request could succeed on a later attempt
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Transport(e) => e.is_transient(),
            _ => false,
        }
    }
}

// ============================================================================
// Draft output and generator trait
// ============================================================================

/// Raw selector output before repair, variety, and ordering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSuggestions {
    /// Possibly malformed items
    pub items: Vec<SuggestionItem>,
    /// Tip for the caller
    pub message: String,
}

/// Produces a draft suggestion list from filtered candidates
#[async_trait]
pub trait ExercisePlanGenerator: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Choose exercises and tentatively assign techniques
    async fn draft(
        &self,
        candidates: &[ExerciseCandidate],
        request: &SuggestionRequest,
    ) -> Result<DraftSuggestions, GenerationError>;
}

// ============================================================================
// Goal lookup
// ============================================================================

/// Default prescription and tip for a training goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProfile {
    /// Working sets
    pub sets: u32,
    /// Repetition range
    pub reps: &'static str,
    /// Rest between sets
    pub rest_seconds: u32,
    /// Tip returned with the suggestions
    pub message: &'static str,
}

impl GoalProfile {
    /// Lookup for a goal
    #[must_use]
    pub const fn for_goal(goal: WorkoutGoal) -> Self {
        match goal {
            WorkoutGoal::Hypertrophy => Self::new(
                4,
                "8-12",
                60,
                "Foque em contracao controlada e tempo sob tensao.",
            ),
            WorkoutGoal::Strength => Self::new(
                5,
                "3-6",
                120,
                "Priorize cargas pesadas com descanso adequado.",
            ),
            WorkoutGoal::FatLoss => {
                Self::new(3, "12-15", 45, "Mantenha o ritmo elevado entre exercicios.")
            }
            WorkoutGoal::Endurance => {
                Self::new(3, "15-20", 30, "Use cargas moderadas com muitas repeticoes.")
            }
            WorkoutGoal::Functional => Self::new(
                3,
                "10-12",
                60,
                "Priorize movimentos compostos e estabilidade.",
            ),
            WorkoutGoal::GeneralFitness => Self::new(3, "10-12", 60, "Bom treino!"),
        }
    }

    const fn new(sets: u32, reps: &'static str, rest_seconds: u32, message: &'static str) -> Self {
        Self {
            sets,
            reps,
            rest_seconds,
            message,
        }
    }

    /// Prescription carried by every item of this goal
    #[must_use]
    pub fn prescription(&self) -> Prescription {
        Prescription::new(self.sets, self.reps, self.rest_seconds)
    }
}

// ABOUTME: Caller constraints for an exercise suggestion request
// ABOUTME: Muscle targets, goal, difficulty, count clamping, context, and technique whitelist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::technique::TechniqueWhitelist;
use super::training::{Difficulty, WorkoutGoal};
use crate::constants::limits::{MAX_SUGGESTION_COUNT, MIN_SUGGESTION_COUNT};

/// Optional information about the plan and workout being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionContext {
    /// Plan name
    #[serde(default)]
    pub plan_name: Option<String>,
    /// Plan goal as free text
    #[serde(default)]
    pub plan_goal: Option<String>,
    /// Plan split type as free text
    #[serde(default)]
    pub plan_split_type: Option<String>,
    /// Workout name
    #[serde(default)]
    pub workout_name: Option<String>,
    /// Workout label ("A", "B", ...)
    #[serde(default)]
    pub workout_label: Option<String>,
    /// Names of exercises already in the workout
    #[serde(default)]
    pub existing_exercises: Vec<String>,
    /// Number of exercises already in the workout
    #[serde(default)]
    pub existing_exercise_count: Option<usize>,
}

fn default_allow_advanced() -> bool {
    true
}

/// Everything the pipeline needs to pick exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Requested muscle groups
    pub muscle_groups: Vec<String>,
    /// Training goal
    pub goal: WorkoutGoal,
    /// Trainee level
    pub difficulty: Difficulty,
    /// Desired number of suggestions, clamped to 1..=12
    pub count: usize,
    /// Candidate ids that must not be suggested
    #[serde(default)]
    pub exclude_ids: Vec<String>,
    /// Plan/workout context
    #[serde(default)]
    pub context: Option<SuggestionContext>,
    /// Whether the engine may use advanced techniques without a whitelist
    #[serde(default = "default_allow_advanced")]
    pub allow_advanced_techniques: bool,
    /// Hard restriction on techniques
    #[serde(default)]
    pub allowed_techniques: Option<TechniqueWhitelist>,
}

impl SuggestionRequest {
    /// Create a request with no exclusions, context, or whitelist
    #[must_use]
    pub fn new<I, S>(muscle_groups: I, goal: WorkoutGoal, difficulty: Difficulty, count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            muscle_groups: muscle_groups.into_iter().map(Into::into).collect(),
            goal,
            difficulty,
            count,
            exclude_ids: Vec::new(),
            context: None,
            allow_advanced_techniques: true,
            allowed_techniques: None,
        }
    }

    /// Exclude candidate ids
    #[must_use]
    pub fn with_exclude_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Attach context
    #[must_use]
    pub fn with_context(mut self, context: SuggestionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Restrict techniques by name
    #[must_use]
    pub fn with_allowed_techniques<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_techniques = Some(TechniqueWhitelist::from_names(names));
        self
    }

    /// Toggle advanced techniques
    #[must_use]
    pub const fn with_advanced_techniques(mut self, allow: bool) -> Self {
        self.allow_advanced_techniques = allow;
        self
    }

    /// Requested count clamped into the supported range
    #[must_use]
    pub fn clamped_count(&self) -> usize {
        self.count.clamp(MIN_SUGGESTION_COUNT, MAX_SUGGESTION_COUNT)
    }

    /// The whitelist, if one was supplied and is non-empty
    #[must_use]
    pub fn technique_whitelist(&self) -> Option<&TechniqueWhitelist> {
        self.allowed_techniques.as_ref().filter(|w| !w.is_empty())
    }

    /// Lowercased names of exercises already present in the workout
    #[must_use]
    pub fn existing_exercise_names(&self) -> HashSet<String> {
        self.context
            .as_ref()
            .map(|ctx| {
                ctx.existing_exercises
                    .iter()
                    .map(|name| name.to_lowercase())
                    .collect()
            })
            .unwrap_or_default()
    }
}

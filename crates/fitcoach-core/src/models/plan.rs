// ABOUTME: Training plan models for multi-workout plan generation
// ABOUTME: Split types, equipment profiles, plan requests, and generated plan structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::suggestion::SuggestionItem;
use super::training::{Difficulty, WorkoutGoal};

/// How a plan distributes muscle groups across the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    /// Three-way split
    Abc,
    /// Four-way split
    Abcd,
    /// Five-way split
    Abcde,
    /// Push / pull / legs, twice a week
    PushPullLegs,
    /// Upper / lower
    UpperLower,
    /// Whole body every session
    FullBody,
    /// Trainer-defined
    Custom,
}

impl SplitType {
    /// Split that fits a training frequency
    #[must_use]
    pub const fn for_days(days_per_week: u8) -> Self {
        match days_per_week {
            0..=2 => Self::FullBody,
            3 => Self::Abc,
            4 => Self::UpperLower,
            5 => Self::Abcde,
            _ => Self::PushPullLegs,
        }
    }

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abc => "abc",
            Self::Abcd => "abcd",
            Self::Abcde => "abcde",
            Self::PushPullLegs => "push_pull_legs",
            Self::UpperLower => "upper_lower",
            Self::FullBody => "full_body",
            Self::Custom => "custom",
        }
    }

    /// Human description used in plan prompts
    #[must_use]
    pub const fn prompt_hint(days_per_week: u8) -> &'static str {
        match days_per_week {
            1 => "Full Body (treino completo)",
            2 => "Full Body (2 treinos alternados)",
            3 => "ABC (3 treinos diferentes)",
            4 => "Upper/Lower (superior/inferior)",
            5 => "ABCDE (5 treinos diferentes)",
            6 => "Push/Pull/Legs (2x por semana)",
            _ => "Personalizado",
        }
    }
}

impl Display for SplitType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Equipment the trainee has access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentProfile {
    /// Commercial gym, no restriction (default)
    #[default]
    FullGym,
    /// Bodyweight and resistance bands
    HomeBasic,
    /// Home setup with dumbbells
    HomeDumbbells,
    /// Home setup with barbell and bench
    HomeFull,
    /// Bodyweight only
    Bodyweight,
}

impl EquipmentProfile {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "home_basic" => Self::HomeBasic,
            "home_dumbbells" => Self::HomeDumbbells,
            "home_full" => Self::HomeFull,
            "bodyweight" => Self::Bodyweight,
            _ => Self::FullGym,
        }
    }

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullGym => "full_gym",
            Self::HomeBasic => "home_basic",
            Self::HomeDumbbells => "home_dumbbells",
            Self::HomeFull => "home_full",
            Self::Bodyweight => "bodyweight",
        }
    }

    /// Equipment tags this profile allows, `None` when unrestricted
    #[must_use]
    pub const fn allowed_equipment(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::FullGym => None,
            Self::HomeBasic => Some(&["bodyweight", "resistance_band"]),
            Self::HomeDumbbells => Some(&["bodyweight", "dumbbells", "resistance_band"]),
            Self::HomeFull => Some(&[
                "bodyweight",
                "dumbbells",
                "barbell",
                "bench",
                "resistance_band",
            ]),
            Self::Bodyweight => Some(&["bodyweight"]),
        }
    }
}

impl Display for EquipmentProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

fn default_preferences() -> String {
    "mixed".to_owned()
}

const fn default_duration_weeks() -> u32 {
    8
}

/// Constraints for generating a full training plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Training goal
    pub goal: WorkoutGoal,
    /// Trainee level
    pub difficulty: Difficulty,
    /// Sessions per week
    pub days_per_week: u8,
    /// Session length in minutes
    pub minutes_per_session: u32,
    /// Available equipment
    #[serde(default)]
    pub equipment: EquipmentProfile,
    /// Injured areas ("shoulder", "knee", "back", "wrist")
    #[serde(default)]
    pub injuries: Vec<String>,
    /// Free-text exercise preference
    #[serde(default = "default_preferences")]
    pub preferences: String,
    /// Plan length in weeks
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: u32,
}

impl PlanRequest {
    /// Create a request with a full gym, no injuries, and an eight-week duration
    #[must_use]
    pub fn new(
        goal: WorkoutGoal,
        difficulty: Difficulty,
        days_per_week: u8,
        minutes_per_session: u32,
    ) -> Self {
        Self {
            goal,
            difficulty,
            days_per_week,
            minutes_per_session,
            equipment: EquipmentProfile::default(),
            injuries: Vec::new(),
            preferences: default_preferences(),
            duration_weeks: default_duration_weeks(),
        }
    }

    /// Set equipment profile
    #[must_use]
    pub const fn with_equipment(mut self, equipment: EquipmentProfile) -> Self {
        self.equipment = equipment;
        self
    }

    /// Set injuries
    #[must_use]
    pub fn with_injuries<I, S>(mut self, injuries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.injuries = injuries.into_iter().map(Into::into).collect();
        self
    }

    /// Set plan duration
    #[must_use]
    pub const fn with_duration_weeks(mut self, weeks: u32) -> Self {
        self.duration_weeks = weeks;
        self
    }
}

/// One workout inside a generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Short label ("A")
    pub label: String,
    /// Display name
    pub name: String,
    /// Position in the week
    pub order: usize,
    /// Muscles the workout targets
    pub target_muscles: Vec<String>,
    /// Ordered exercises
    pub exercises: Vec<SuggestionItem>,
}

/// A complete generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Plan name
    pub name: String,
    /// Short description
    pub description: String,
    /// Training goal
    pub goal: WorkoutGoal,
    /// Trainee level
    pub difficulty: Difficulty,
    /// Split used
    pub split_type: SplitType,
    /// Plan length in weeks
    pub duration_weeks: u32,
    /// Workouts in weekly order
    pub workouts: Vec<PlannedWorkout>,
    /// Tip shown alongside the plan
    pub message: String,
}

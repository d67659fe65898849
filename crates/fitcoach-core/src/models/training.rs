// ABOUTME: Training goal and difficulty enumerations shared by suggestions and plans
// ABOUTME: Lenient string parsing with defaults, Display, and serde snake_case wire names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Primary goal of a workout or plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutGoal {
    /// Muscle growth
    Hypertrophy,
    /// Maximal strength
    Strength,
    /// Fat loss and conditioning
    FatLoss,
    /// Muscular endurance
    Endurance,
    /// Functional movement and mobility
    Functional,
    /// General fitness (default)
    #[default]
    GeneralFitness,
}

impl WorkoutGoal {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hypertrophy" => Self::Hypertrophy,
            "strength" => Self::Strength,
            "fat_loss" | "fatloss" => Self::FatLoss,
            "endurance" => Self::Endurance,
            "functional" => Self::Functional,
            _ => Self::GeneralFitness,
        }
    }

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hypertrophy => "hypertrophy",
            Self::Strength => "strength",
            Self::FatLoss => "fat_loss",
            Self::Endurance => "endurance",
            Self::Functional => "functional",
            Self::GeneralFitness => "general_fitness",
        }
    }
}

impl Display for WorkoutGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Trainee experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// New to resistance training
    Beginner,
    /// Comfortable with compound and isolation work (default)
    #[default]
    Intermediate,
    /// Ready for high-intensity techniques
    Advanced,
}

impl Difficulty {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "advanced" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

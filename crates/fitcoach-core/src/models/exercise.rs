// ABOUTME: Exercise candidate model supplied by callers as the selection pool
// ABOUTME: Immutable catalog entry with muscle, equipment, and builder helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Case-insensitive tag comparison over full Unicode (`GLÚTEOS` matches `glúteos`)
#[must_use]
pub fn tags_match(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// An exercise the engine may suggest
///
/// Candidates are read-only: the pipeline clones them into suggestions but
/// never mutates the caller's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCandidate {
    /// Stable identifier
    pub id: String,
    /// Display name, Portuguese or English
    pub name: String,
    /// Primary muscle group tag (e.g. "chest")
    pub muscle_group: String,
    /// Secondary muscles worked
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Equipment tags; empty means bodyweight
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExerciseCandidate {
    /// Create a candidate with no equipment or secondary muscles
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        muscle_group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            muscle_group: muscle_group.into(),
            secondary_muscles: Vec::new(),
            equipment: Vec::new(),
            description: None,
        }
    }

    /// Set equipment tags
    #[must_use]
    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = equipment.into_iter().map(Into::into).collect();
        self
    }

    /// Set secondary muscles
    #[must_use]
    pub fn with_secondary_muscles<I, S>(mut self, muscles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_muscles = muscles.into_iter().map(Into::into).collect();
        self
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Case-insensitive primary muscle comparison
    #[must_use]
    pub fn targets(&self, muscle: &str) -> bool {
        tags_match(&self.muscle_group, muscle)
    }

    /// Lowercased muscle group, used as a grouping key
    #[must_use]
    pub fn muscle_key(&self) -> String {
        self.muscle_group.to_lowercase()
    }
}

// ABOUTME: Suggestion item model mutated through the repair, variety, and ordering stages
// ABOUTME: Includes prescriptions, group identity helpers, and the final suggestion result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::ExerciseCandidate;
use super::technique::Technique;
use crate::constants::techniques::DEMOTED_REST_SECS;

/// Sets, reps, and rest for one exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    /// Working sets
    pub sets: u32,
    /// Free-form repetition range ("8-12")
    pub reps: String,
    /// Rest after the exercise, in seconds
    pub rest_seconds: u32,
}

impl Prescription {
    /// Create a prescription
    #[must_use]
    pub fn new(sets: u32, reps: impl Into<String>, rest_seconds: u32) -> Self {
        Self {
            sets,
            reps: reps.into(),
            rest_seconds,
        }
    }
}

/// One suggested exercise with its technique and group membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    /// Referenced candidate id
    pub exercise_id: String,
    /// Candidate name
    pub name: String,
    /// Candidate muscle group
    pub muscle_group: String,
    /// Working sets
    pub sets: u32,
    /// Repetition range
    pub reps: String,
    /// Rest after this exercise
    pub rest_seconds: u32,
    /// Position in the final list
    pub order: usize,
    /// Why the exercise was chosen
    pub reason: String,
    /// Applied technique
    #[serde(rename = "technique_type")]
    pub technique: Technique,
    /// Shared by all members of a technique group
    #[serde(rename = "exercise_group_id")]
    pub group_id: Option<String>,
    /// Position inside the group
    #[serde(rename = "exercise_group_order")]
    pub group_order: usize,
    /// Technique-specific guidance
    pub execution_instructions: Option<String>,
    /// Isometric hold at peak contraction
    pub isometric_seconds: Option<u32>,
}

impl SuggestionItem {
    /// Create an ungrouped `Normal` item for a candidate
    #[must_use]
    pub fn from_candidate(
        candidate: &ExerciseCandidate,
        prescription: &Prescription,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            exercise_id: candidate.id.clone(),
            name: candidate.name.clone(),
            muscle_group: candidate.muscle_group.clone(),
            sets: prescription.sets,
            reps: prescription.reps.clone(),
            rest_seconds: prescription.rest_seconds,
            order: 0,
            reason: reason.into(),
            technique: Technique::Normal,
            group_id: None,
            group_order: 0,
            execution_instructions: None,
            isometric_seconds: None,
        }
    }

    /// Set the technique
    #[must_use]
    pub const fn with_technique(mut self, technique: Technique) -> Self {
        self.technique = technique;
        self
    }

    /// Place the item in a group
    #[must_use]
    pub fn in_group(mut self, group_id: &str, group_order: usize) -> Self {
        self.group_id = Some(group_id.to_owned());
        self.group_order = group_order;
        self
    }

    /// Set rest seconds
    #[must_use]
    pub const fn with_rest(mut self, rest_seconds: u32) -> Self {
        self.rest_seconds = rest_seconds;
        self
    }

    /// Set execution instructions
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.execution_instructions = Some(instructions.into());
        self
    }

    /// Whether the item carries a group id
    #[must_use]
    pub const fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }

    /// Drop group membership
    pub fn clear_group(&mut self) {
        self.group_id = None;
        self.group_order = 0;
    }

    /// Turn a member of an unrecoverable group into a plain exercise
    pub fn demote(&mut self) {
        self.technique = Technique::Normal;
        self.clear_group();
        self.rest_seconds = DEMOTED_REST_SECS;
    }
}

/// Generate a fresh group id (`group-` plus eight hex characters)
#[must_use]
pub fn generate_group_id() -> String {
    let hex: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("group-{hex}")
}

/// Final output of the suggestion pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// Ordered suggestions
    pub suggestions: Vec<SuggestionItem>,
    /// Tip shown alongside the suggestions
    pub message: String,
}

impl SuggestionResult {
    /// Result with no suggestions
    #[must_use]
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            suggestions: Vec::new(),
            message: message.into(),
        }
    }
}

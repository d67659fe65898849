// ABOUTME: Domain models for exercise suggestion and training plan generation
// ABOUTME: Re-exports candidates, requests, suggestion items, techniques, and plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Models
//!
//! Plain data types shared by the suggestion pipeline and the plan generator.
//! Candidates are caller-owned and immutable; [`SuggestionItem`]s are created
//! by a selector and mutated through repair, variety, and ordering.

/// Caller-supplied exercise candidates
pub mod exercise;
/// Training plan requests and generated plans
pub mod plan;
/// Suggestion request and context
pub mod request;
/// Suggestion items and results
pub mod suggestion;
/// Training techniques and whitelists
pub mod technique;
/// Goal and difficulty enums
pub mod training;

pub use exercise::{tags_match, ExerciseCandidate};
pub use plan::{EquipmentProfile, GeneratedPlan, PlanRequest, PlannedWorkout, SplitType};
pub use request::{SuggestionContext, SuggestionRequest};
pub use suggestion::{generate_group_id, Prescription, SuggestionItem, SuggestionResult};
pub use technique::{technique_permitted, Technique, TechniqueWhitelist};
pub use training::{Difficulty, WorkoutGoal};

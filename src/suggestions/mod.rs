// ABOUTME: Exercise suggestion pipeline module wiring selectors, repair, variety, and ordering
// ABOUTME: Re-exports the service and the stage functions used by plan generation and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Suggestions
//!
//! Pipeline for a single suggestion request:
//!
//! 1. [`filter_candidates`] narrows the caller pool to the requested muscles
//! 2. an [`ExercisePlanGenerator`] drafts a list (LLM first, rules as fallback)
//! 3. [`repair_groups`] enforces the technique catalog
//! 4. [`ensure_variety`] adds whitelisted techniques that are missing
//! 5. [`order_suggestions`] puts compound movements first
//!
//! [`SuggestionService`] runs all of it.

/// LLM-backed selector
pub mod ai_selector;
/// Technique constraint catalog
pub mod catalog;
/// Compound/isolation keyword classifier
pub mod classifier;
/// Candidate filtering
pub mod filter;
/// Generator trait, errors, and goal prescriptions
pub mod generator;
/// Compound-first ordering
pub mod orderer;
/// Group-only rule-based generation
pub mod paired;
/// Unused candidate pool
pub mod pool;
/// Suggestion prompt construction
pub mod prompt;
/// Group repair engine
pub mod repair;
/// LLM output parsing and validation
pub mod response;
/// Rule-based selector
pub mod rule_selector;
/// Pipeline orchestrator
pub mod service;
/// Technique variety enforcement
pub mod variety;

pub use ai_selector::LlmExerciseGenerator;
pub use catalog::{rule_for, GroupSize, MusclePairing, TechniqueRule, CATALOG};
pub use classifier::{classify, MovementClass};
pub use filter::filter_candidates;
pub use generator::{DraftSuggestions, ExercisePlanGenerator, GenerationError, GoalProfile};
pub use orderer::order_suggestions;
pub use pool::UnusedPool;
pub use repair::repair_groups;
pub use rule_selector::RuleBasedGenerator;
pub use service::SuggestionService;
pub use variety::ensure_variety;

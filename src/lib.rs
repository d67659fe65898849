// ABOUTME: Main library entry point for the FitCoach exercise suggestion engine
// ABOUTME: Exposes the suggestion pipeline, plan generation, LLM transport, config, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitCoach` Engine
//!
//! Exercise-selection and technique-grouping engine for a fitness coaching
//! backend. Given a caller-supplied pool of exercises and a set of
//! constraints, the engine picks exercises, assigns advanced techniques
//! (supersets, bi-sets, tri-sets, giant sets, dropsets, rest-pause, cluster),
//! repairs malformed groups, and orders the result compound-first.
//!
//! ## Architecture
//!
//! - **Suggestions**: filter → selector (AI or rule-based) → group repair →
//!   variety enforcement → ordering
//! - **Plans**: multi-workout plan generation reusing repair and ordering
//! - **LLM**: `OpenAI`-compatible chat completion providers
//! - **Config**: environment-driven engine settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitcoach_engine::models::{Difficulty, ExerciseCandidate, SuggestionRequest, WorkoutGoal};
//! use fitcoach_engine::suggestions::SuggestionService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = SuggestionService::rule_based_only();
//!     let pool = vec![
//!         ExerciseCandidate::new("1", "Supino reto", "chest"),
//!         ExerciseCandidate::new("2", "Crucifixo", "chest"),
//!     ];
//!     let request =
//!         SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 2);
//!     let result = service.suggest(&pool, &request).await;
//!     println!("{} exercicios: {}", result.suggestions.len(), result.message);
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// LLM provider abstraction and `OpenAI`-compatible transport
pub mod llm;

/// Structured logging setup and domain log events
pub mod logging;

/// Multi-workout training plan generation
pub mod plans;

/// Exercise suggestion pipeline
pub mod suggestions;

pub use fitcoach_core::{constants, errors, models};

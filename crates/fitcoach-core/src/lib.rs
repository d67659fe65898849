// ABOUTME: Core types and constants for the FitCoach exercise suggestion engine
// ABOUTME: Foundation crate with error handling, domain models, and technique constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitCoach Core
//!
//! Foundation crate providing shared types and constants for the FitCoach
//! exercise-selection engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Technique limits, prompt limits, and user-facing messages
//! - **models**: Exercise candidates, suggestion items, techniques, and plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`ExerciseCandidate`, `SuggestionItem`, `Technique`, plans)
pub mod models;

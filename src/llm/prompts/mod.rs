// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the trainer personas for exercise suggestion and plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.
//! The per-request user prompts are assembled in `suggestions::prompt` and
//! `plans::prompt`.

/// System prompt for exercise suggestions
pub const SUGGESTION_SYSTEM_PROMPT: &str = include_str!("suggestion_system.md");

/// System prompt for full training plans
pub const PLAN_SYSTEM_PROMPT: &str = include_str!("plan_system.md");

/// Get the system prompt for exercise suggestions
#[must_use]
pub fn suggestion_system_prompt() -> &'static str {
    SUGGESTION_SYSTEM_PROMPT.trim()
}

/// Get the system prompt for plan generation
#[must_use]
pub fn plan_system_prompt() -> &'static str {
    PLAN_SYSTEM_PROMPT.trim()
}

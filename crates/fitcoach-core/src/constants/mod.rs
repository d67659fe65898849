// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Technique group limits, candidate caps, LLM defaults, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single flat list.

/// Service identity used in structured logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const FITCOACH_ENGINE: &str = "fitcoach-engine";
}

/// Group sizes and rest bounds for advanced techniques
pub mod techniques {
    /// Members in a bi-set
    pub const BISET_SIZE: usize = 2;
    /// Members in a superset
    pub const SUPERSET_SIZE: usize = 2;
    /// Members in a tri-set
    pub const TRISET_SIZE: usize = 3;
    /// Smallest giant set
    pub const GIANTSET_MIN: usize = 4;
    /// Largest giant set
    pub const GIANTSET_MAX: usize = 8;
    /// Lower bound for the rest taken after the last member of a group
    pub const GROUP_REST_MIN_SECS: u32 = 60;
    /// Upper bound for the rest taken after the last member of a group
    pub const GROUP_REST_MAX_SECS: u32 = 90;
    /// Rest assigned to an exercise demoted out of a broken group
    pub const DEMOTED_REST_SECS: u32 = 60;
}

/// Request and prompt size limits
pub mod limits {
    /// Smallest number of suggestions a caller may ask for
    pub const MIN_SUGGESTION_COUNT: usize = 1;
    /// Largest number of suggestions a caller may ask for
    pub const MAX_SUGGESTION_COUNT: usize = 12;
    /// Candidates listed in a suggestion prompt
    pub const SUGGESTION_CANDIDATE_LIMIT: usize = 50;
    /// Candidates listed in a plan prompt
    pub const PLAN_CANDIDATE_LIMIT: usize = 100;
    /// Timeout for a single LLM call
    pub const AI_TIMEOUT_SECS: u64 = 60;
    /// Fewest exercises in a generated workout
    pub const MIN_EXERCISES_PER_WORKOUT: usize = 4;
    /// Most exercises in a generated workout
    pub const MAX_EXERCISES_PER_WORKOUT: usize = 8;
    /// Session minutes budgeted per exercise
    pub const MINUTES_PER_EXERCISE: u32 = 8;
}

/// Sampling defaults for LLM calls
pub mod llm {
    /// Temperature for exercise suggestions
    pub const SUGGESTION_TEMPERATURE: f32 = 0.7;
    /// Token budget for exercise suggestions
    pub const SUGGESTION_MAX_TOKENS: u32 = 2000;
    /// Temperature for full plan generation
    pub const PLAN_TEMPERATURE: f32 = 0.5;
    /// Token budget for full plan generation
    pub const PLAN_MAX_TOKENS: u32 = 3000;
}

/// User-facing messages (Portuguese, matching the product UI)
pub mod messages {
    /// Returned when no candidate matches the requested muscle groups
    pub const NO_MATCHING_EXERCISES: &str =
        "Nenhum exercício encontrado para os grupos musculares selecionados.";
    /// Closing message attached to rule-based plans
    pub const PLAN_REVIEW_MESSAGE: &str = "Plano gerado com base nas suas preferencias. Revise os treinos e faca ajustes conforme necessario.";
    /// Execution guidance for dropsets
    pub const DROPSET_INSTRUCTIONS: &str = "Faca 2-3 reducoes de carga de 20-30%";
    /// Execution guidance for rest-pause sets
    pub const REST_PAUSE_INSTRUCTIONS: &str =
        "Faca ate a falha, descanse 10-15s, repita 2-3 vezes.";
    /// Execution guidance for cluster sets
    pub const CLUSTER_INSTRUCTIONS: &str =
        "Divida a serie em blocos curtos com 10-20s de descanso entre eles.";
    /// Execution guidance for bi-sets built by the plan generator
    pub const BISET_INSTRUCTIONS: &str = "Sem descanso entre exercicios do bi-set.";
}

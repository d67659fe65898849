// ABOUTME: Suggestion engine configuration loaded from FITCOACH_* environment variables
// ABOUTME: AI toggle, LLM timeout, prompt candidate caps, sampling parameters, and RNG seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::limits::{
    AI_TIMEOUT_SECS, PLAN_CANDIDATE_LIMIT, SUGGESTION_CANDIDATE_LIMIT,
};
use crate::constants::llm::{
    PLAN_MAX_TOKENS, PLAN_TEMPERATURE, SUGGESTION_MAX_TOKENS, SUGGESTION_TEMPERATURE,
};

use super::types::LlmProviderType;

/// Runtime settings for the suggestion and plan pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEngineConfig {
    /// Whether the AI-backed selectors are tried before the rule-based fallback
    pub ai_enabled: bool,
    /// Upper bound on a single LLM call
    pub ai_timeout: Duration,
    /// Candidates listed in a suggestion prompt
    pub candidate_limit: usize,
    /// Candidates listed in a plan prompt
    pub plan_candidate_limit: usize,
    /// Sampling temperature for suggestions
    pub temperature: f32,
    /// Token budget for suggestions
    pub max_tokens: u32,
    /// Sampling temperature for plans
    pub plan_temperature: f32,
    /// Token budget for plans
    pub plan_max_tokens: u32,
    /// Fixed seed for the rule-based generators, entropy when `None`
    pub rng_seed: Option<u64>,
    /// Model override passed to the LLM provider
    pub model: Option<String>,
}

impl Default for SuggestionEngineConfig {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            ai_timeout: Duration::from_secs(AI_TIMEOUT_SECS),
            candidate_limit: SUGGESTION_CANDIDATE_LIMIT,
            plan_candidate_limit: PLAN_CANDIDATE_LIMIT,
            temperature: SUGGESTION_TEMPERATURE,
            max_tokens: SUGGESTION_MAX_TOKENS,
            plan_temperature: PLAN_TEMPERATURE,
            plan_max_tokens: PLAN_MAX_TOKENS,
            rng_seed: None,
            model: None,
        }
    }
}

impl SuggestionEngineConfig {
    /// Toggle for the AI selectors
    pub const AI_ENABLED_ENV_VAR: &'static str = "FITCOACH_AI_ENABLED";
    /// LLM timeout in seconds
    pub const AI_TIMEOUT_ENV_VAR: &'static str = "FITCOACH_AI_TIMEOUT_SECS";
    /// Suggestion prompt candidate cap
    pub const CANDIDATE_LIMIT_ENV_VAR: &'static str = "FITCOACH_AI_CANDIDATE_LIMIT";
    /// Plan prompt candidate cap
    pub const PLAN_CANDIDATE_LIMIT_ENV_VAR: &'static str = "FITCOACH_PLAN_CANDIDATE_LIMIT";
    /// Suggestion temperature
    pub const TEMPERATURE_ENV_VAR: &'static str = "FITCOACH_AI_TEMPERATURE";
    /// Suggestion token budget
    pub const MAX_TOKENS_ENV_VAR: &'static str = "FITCOACH_AI_MAX_TOKENS";
    /// Plan temperature
    pub const PLAN_TEMPERATURE_ENV_VAR: &'static str = "FITCOACH_PLAN_TEMPERATURE";
    /// Plan token budget
    pub const PLAN_MAX_TOKENS_ENV_VAR: &'static str = "FITCOACH_PLAN_MAX_TOKENS";
    /// Seed for the rule-based generators
    pub const RNG_SEED_ENV_VAR: &'static str = "FITCOACH_RNG_SEED";

    /// Load configuration from environment variables
    ///
    /// Unset variables take their defaults. Unparseable values are logged and
    /// also fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ai_enabled: env::var(Self::AI_ENABLED_ENV_VAR)
                .map_or(defaults.ai_enabled, |v| parse_bool(&v, defaults.ai_enabled)),
            ai_timeout: Duration::from_secs(env_parse_or(
                Self::AI_TIMEOUT_ENV_VAR,
                defaults.ai_timeout.as_secs(),
            )),
            candidate_limit: env_parse_or(Self::CANDIDATE_LIMIT_ENV_VAR, defaults.candidate_limit),
            plan_candidate_limit: env_parse_or(
                Self::PLAN_CANDIDATE_LIMIT_ENV_VAR,
                defaults.plan_candidate_limit,
            ),
            temperature: env_parse_or(Self::TEMPERATURE_ENV_VAR, defaults.temperature),
            max_tokens: env_parse_or(Self::MAX_TOKENS_ENV_VAR, defaults.max_tokens),
            plan_temperature: env_parse_or(
                Self::PLAN_TEMPERATURE_ENV_VAR,
                defaults.plan_temperature,
            ),
            plan_max_tokens: env_parse_or(Self::PLAN_MAX_TOKENS_ENV_VAR, defaults.plan_max_tokens),
            rng_seed: env_parse_optional(Self::RNG_SEED_ENV_VAR),
            model: LlmProviderType::model_from_env(),
        }
    }

    /// Configuration with the AI selectors switched off
    #[must_use]
    pub fn rule_based_only() -> Self {
        Self {
            ai_enabled: false,
            ..Self::default()
        }
    }

    /// Set the LLM timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }

    /// Fix the rule-based generator seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        other => {
            warn!(value = other, default, "Invalid boolean in configuration, using default");
            default
        }
    }
}

fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    env::var(key).map_or(default, |raw| {
        raw.trim().parse().unwrap_or_else(|_| {
            warn!(
                key,
                value = %raw,
                default = %default,
                "Invalid configuration value, using default"
            );
            default
        })
    })
}

fn env_parse_optional<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok().filter(|v| !v.trim().is_empty())?;
    raw.trim().parse().map_or_else(
        |_| {
            warn!(key, value = %raw, "Invalid configuration value, ignoring");
            None
        },
        Some,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("YES", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("maybe", true));
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = SuggestionEngineConfig::default();
        assert!(config.ai_enabled);
        assert_eq!(config.ai_timeout, Duration::from_secs(60));
        assert_eq!(config.candidate_limit, 50);
        assert_eq!(config.plan_candidate_limit, 100);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.plan_max_tokens, 3000);
        assert!(config.rng_seed.is_none());
    }
}

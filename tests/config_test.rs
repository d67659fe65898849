// ABOUTME: Environment-driven configuration tests for the engine, LLM provider, and logging
// ABOUTME: Serialized because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;
use std::time::Duration;

use common::init_test_logging;
use fitcoach_engine::config::{Environment, LlmProviderType, SuggestionEngineConfig};
use fitcoach_engine::errors::ErrorCode;
use fitcoach_engine::llm::create_provider;
use fitcoach_engine::logging::{LogFormat, LoggingConfig};
use fitcoach_engine::plans::PlanService;
use fitcoach_engine::suggestions::SuggestionService;
use serial_test::serial;

const ENGINE_VARS: [&str; 9] = [
    SuggestionEngineConfig::AI_ENABLED_ENV_VAR,
    SuggestionEngineConfig::AI_TIMEOUT_ENV_VAR,
    SuggestionEngineConfig::CANDIDATE_LIMIT_ENV_VAR,
    SuggestionEngineConfig::PLAN_CANDIDATE_LIMIT_ENV_VAR,
    SuggestionEngineConfig::TEMPERATURE_ENV_VAR,
    SuggestionEngineConfig::MAX_TOKENS_ENV_VAR,
    SuggestionEngineConfig::PLAN_TEMPERATURE_ENV_VAR,
    SuggestionEngineConfig::PLAN_MAX_TOKENS_ENV_VAR,
    SuggestionEngineConfig::RNG_SEED_ENV_VAR,
];

fn clear_env() {
    for key in ENGINE_VARS {
        env::remove_var(key);
    }
    for key in [
        LlmProviderType::ENV_VAR,
        LlmProviderType::MODEL_ENV_VAR,
        "OPENAI_API_KEY",
        "GROQ_API_KEY",
        "LOG_FORMAT",
        "ENVIRONMENT",
        "SERVICE_NAME",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_engine_config_defaults_without_env() {
    init_test_logging();
    clear_env();

    let config = SuggestionEngineConfig::from_env();

    assert!(config.ai_enabled);
    assert_eq!(config.ai_timeout, Duration::from_secs(60));
    assert_eq!(config.candidate_limit, 50);
    assert_eq!(config.plan_candidate_limit, 100);
    assert!(config.rng_seed.is_none());
    assert!(config.model.is_none());
}

#[test]
#[serial]
fn test_engine_config_reads_overrides() {
    init_test_logging();
    clear_env();
    env::set_var(SuggestionEngineConfig::AI_ENABLED_ENV_VAR, "off");
    env::set_var(SuggestionEngineConfig::AI_TIMEOUT_ENV_VAR, "15");
    env::set_var(SuggestionEngineConfig::CANDIDATE_LIMIT_ENV_VAR, "20");
    env::set_var(SuggestionEngineConfig::TEMPERATURE_ENV_VAR, "0.3");
    env::set_var(SuggestionEngineConfig::RNG_SEED_ENV_VAR, "1234");
    env::set_var(LlmProviderType::MODEL_ENV_VAR, "llama-3.3-70b-versatile");

    let config = SuggestionEngineConfig::from_env();

    assert!(!config.ai_enabled);
    assert_eq!(config.ai_timeout, Duration::from_secs(15));
    assert_eq!(config.candidate_limit, 20);
    assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.rng_seed, Some(1234));
    assert_eq!(config.model.as_deref(), Some("llama-3.3-70b-versatile"));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_fall_back_to_defaults() {
    init_test_logging();
    clear_env();
    env::set_var(SuggestionEngineConfig::AI_TIMEOUT_ENV_VAR, "soon");
    env::set_var(SuggestionEngineConfig::MAX_TOKENS_ENV_VAR, "-5");
    env::set_var(SuggestionEngineConfig::RNG_SEED_ENV_VAR, "abc");

    let config = SuggestionEngineConfig::from_env();

    assert_eq!(config.ai_timeout, Duration::from_secs(60));
    assert_eq!(config.max_tokens, 2000);
    assert!(config.rng_seed.is_none());
    clear_env();
}

#[test]
#[serial]
fn test_provider_type_from_env() {
    init_test_logging();
    clear_env();
    assert_eq!(LlmProviderType::from_env(), LlmProviderType::OpenAi);

    env::set_var(LlmProviderType::ENV_VAR, "Groq");
    assert_eq!(LlmProviderType::from_env(), LlmProviderType::Groq);

    env::set_var(LlmProviderType::ENV_VAR, "vllm");
    assert_eq!(LlmProviderType::from_env(), LlmProviderType::Local);
    clear_env();
}

#[test]
#[serial]
fn test_hosted_provider_requires_api_key() {
    init_test_logging();
    clear_env();

    let openai = create_provider(LlmProviderType::OpenAi).err().unwrap();
    assert_eq!(openai.code, ErrorCode::ConfigMissing);

    env::set_var("GROQ_API_KEY", "gsk-test");
    let groq = create_provider(LlmProviderType::Groq).unwrap();
    assert_eq!(groq.name(), "groq");
    clear_env();
}

#[test]
#[serial]
fn test_services_downgrade_without_provider() {
    init_test_logging();
    clear_env();

    let config = SuggestionEngineConfig::from_env();
    assert!(!SuggestionService::from_config(&config).has_primary());

    env::set_var("OPENAI_API_KEY", "sk-test");
    let config = SuggestionEngineConfig::from_env();
    assert!(SuggestionService::from_config(&config).has_primary());
    assert!(!SuggestionService::from_config(&SuggestionEngineConfig::rule_based_only()).has_primary());
    let _ = PlanService::from_config(&config);
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "fitcoach-test");

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, Environment::Production);
    assert!(config.include_location);
    assert_eq!(config.service_name, "fitcoach-test");
    clear_env();
}

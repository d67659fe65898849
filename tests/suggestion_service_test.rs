// ABOUTME: End-to-end tests for the suggestion pipeline through SuggestionService
// ABOUTME: Covers rule-based fallback, AI drafts from a mock provider, whitelists, and empty pools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use common::{
    assert_suggestion_invariants, chest_back_pool, chest_pool, init_test_logging, MockLlmProvider,
    MockReply,
};
use fitcoach_engine::config::SuggestionEngineConfig;
use fitcoach_engine::constants::messages::NO_MATCHING_EXERCISES;
use fitcoach_engine::models::{
    Difficulty, ExerciseCandidate, SuggestionContext, SuggestionRequest, Technique, WorkoutGoal,
};
use fitcoach_engine::suggestions::{order_suggestions, RuleBasedGenerator, SuggestionService};

fn seeded_rule_service(seed: u64) -> SuggestionService {
    SuggestionService::with_generators(None, RuleBasedGenerator::with_seed(seed))
}

fn ai_service(provider: &Arc<MockLlmProvider>, config: &SuggestionEngineConfig) -> SuggestionService {
    SuggestionService::new(provider.clone(), config)
}

const FRAGMENTED_BISETS: &str = r#"```json
{
  "suggestions": [
    {"exercise_id": "c0", "sets": 4, "reps": "8-12", "rest_seconds": 60, "technique_type": "biset", "exercise_group_id": "g1", "exercise_group_order": 0},
    {"exercise_id": "c1", "sets": 4, "reps": "8-12", "rest_seconds": 60, "technique_type": "biset", "exercise_group_id": "g2", "exercise_group_order": 0},
    {"exercise_id": "c2", "sets": 4, "reps": "8-12", "rest_seconds": 60, "technique_type": "biset", "exercise_group_id": "g3", "exercise_group_order": 0}
  ],
  "message": "Bi-sets para o peito"
}
```"#;

#[tokio::test]
async fn test_rule_based_hypertrophy_returns_requested_count() {
    init_test_logging();
    let service = SuggestionService::rule_based_only();
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 6);

    let result = service.suggest(&chest_pool(), &request).await;

    assert_eq!(result.suggestions.len(), 6);
    assert!(result.suggestions.iter().all(|s| s.technique == Technique::Normal));
    assert!(result
        .suggestions
        .iter()
        .all(|s| s.sets == 4 && s.reps == "8-12" && s.rest_seconds == 60));
    assert_suggestion_invariants(&result.suggestions, None);
}

#[tokio::test]
async fn test_rule_based_advanced_hypertrophy_has_single_dropset() {
    init_test_logging();
    let service = seeded_rule_service(3);
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Advanced, 6);

    let result = service.suggest(&chest_pool(), &request).await;

    assert_eq!(result.suggestions.len(), 6);
    let dropsets = result
        .suggestions
        .iter()
        .filter(|s| s.technique == Technique::Dropset)
        .count();
    assert_eq!(dropsets, 1);
    assert!(result
        .suggestions
        .iter()
        .all(|s| matches!(s.technique, Technique::Normal | Technique::Dropset)));
    assert_suggestion_invariants(&result.suggestions, None);
}

#[tokio::test]
async fn test_superset_whitelist_pairs_chest_with_back() {
    init_test_logging();
    let service = seeded_rule_service(11);
    let request = SuggestionRequest::new(["chest", "back"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 4)
        .with_allowed_techniques(["superset"]);

    let result = service.suggest(&chest_back_pool(), &request).await;

    assert_eq!(result.suggestions.len(), 4);
    let groups: HashSet<&str> = result
        .suggestions
        .iter()
        .filter_map(|s| s.group_id.as_deref())
        .collect();
    assert_eq!(groups.len(), 2);

    for pair in result.suggestions.chunks(2) {
        assert!(pair.iter().all(|s| s.technique == Technique::Superset));
        assert_eq!(pair[0].group_id, pair[1].group_id);
        let muscles: HashSet<&str> = pair.iter().map(|s| s.muscle_group.as_str()).collect();
        assert_eq!(muscles, HashSet::from(["chest", "back"]));
        assert_eq!(pair[0].rest_seconds, 0);
        assert!((60..=90).contains(&pair[1].rest_seconds));
    }
    assert_suggestion_invariants(&result.suggestions, request.technique_whitelist());
}

#[tokio::test]
async fn test_ai_fragmented_bisets_are_merged_and_leftover_demoted() {
    init_test_logging();
    let provider = Arc::new(MockLlmProvider::with_content(FRAGMENTED_BISETS));
    let service = ai_service(&provider, &SuggestionEngineConfig::default());
    let pool: Vec<ExerciseCandidate> = chest_pool().into_iter().take(3).collect();
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Advanced, 3);

    let result = service.suggest(&pool, &request).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(result.message, "Bi-sets para o peito");
    assert_eq!(result.suggestions.len(), 3);

    let bisets: Vec<_> = result
        .suggestions
        .iter()
        .filter(|s| s.technique == Technique::Biset)
        .collect();
    assert_eq!(bisets.len(), 2);
    assert_eq!(bisets[0].group_id, bisets[1].group_id);
    assert_eq!(bisets[0].rest_seconds, 0);
    assert_eq!(bisets[1].rest_seconds, 60);

    let demoted = result
        .suggestions
        .iter()
        .find(|s| s.technique == Technique::Normal)
        .unwrap();
    assert_eq!(demoted.exercise_id, "c2");
    assert!(demoted.group_id.is_none());
    assert_eq!(demoted.rest_seconds, 60);
    assert_suggestion_invariants(&result.suggestions, None);
}

#[tokio::test]
async fn test_two_technique_whitelist_on_single_muscle_does_not_fail() {
    init_test_logging();
    let service = seeded_rule_service(5);
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 1)
        .with_allowed_techniques(["biset", "dropset"]);

    let result = service.suggest(&chest_pool(), &request).await;

    assert!(!result.suggestions.is_empty());
    assert!(result
        .suggestions
        .iter()
        .all(|s| matches!(s.technique, Technique::Biset | Technique::Dropset)));
    assert!(result.suggestions.iter().any(|s| s.technique == Technique::Dropset));
    for biset in result.suggestions.iter().filter(|s| s.technique == Technique::Biset) {
        assert_eq!(biset.muscle_group, "chest");
    }
    assert_suggestion_invariants(&result.suggestions, request.technique_whitelist());
}

#[tokio::test]
async fn test_orderer_is_idempotent_on_final_output() {
    init_test_logging();
    let service = seeded_rule_service(21);
    let request = SuggestionRequest::new(["chest", "back"], WorkoutGoal::Hypertrophy, Difficulty::Advanced, 8)
        .with_allowed_techniques(["normal", "superset", "dropset"]);

    let result = service.suggest(&chest_back_pool(), &request).await;
    let reordered = order_suggestions(result.suggestions.clone());

    assert_eq!(reordered, result.suggestions);
}

#[tokio::test]
async fn test_unknown_muscle_returns_empty_with_message() {
    init_test_logging();
    let provider = Arc::new(MockLlmProvider::with_content(FRAGMENTED_BISETS));
    let service = ai_service(&provider, &SuggestionEngineConfig::default());
    let request = SuggestionRequest::new(["cardio"], WorkoutGoal::Endurance, Difficulty::Beginner, 4);

    let result = service.suggest(&chest_back_pool(), &request).await;

    assert!(result.suggestions.is_empty());
    assert_eq!(result.message, NO_MATCHING_EXERCISES);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_provider_error_falls_back_to_rules() {
    init_test_logging();
    let provider = Arc::new(MockLlmProvider::new(MockReply::RateLimited));
    let config = SuggestionEngineConfig::default().with_seed(1);
    let service = ai_service(&provider, &config);
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Strength, Difficulty::Beginner, 3);

    let result = service.suggest(&chest_pool(), &request).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(result.suggestions.len(), 3);
    assert_eq!(result.message, "Priorize cargas pesadas com descanso adequado.");
    assert!(result.suggestions.iter().all(|s| s.sets == 5 && s.reps == "3-6"));
}

#[tokio::test]
async fn test_slow_provider_times_out_and_falls_back() {
    init_test_logging();
    let provider = Arc::new(MockLlmProvider::new(MockReply::Slow(
        Duration::from_millis(500),
        FRAGMENTED_BISETS.to_owned(),
    )));
    let config = SuggestionEngineConfig::default().with_timeout(Duration::from_millis(20));
    let service = ai_service(&provider, &config);
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 3);

    let result = service.suggest(&chest_pool(), &request).await;

    assert_eq!(result.suggestions.len(), 3);
    assert!(result.suggestions.iter().all(|s| s.technique == Technique::Normal));
}

#[tokio::test]
async fn test_malformed_and_unknown_id_responses_fall_back() {
    init_test_logging();
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 2);

    for content in [
        "Aqui estao suas sugestoes!",
        r#"{"suggestions": [{"exercise_id": "does-not-exist"}]}"#,
        "",
    ] {
        let provider = Arc::new(MockLlmProvider::with_content(content));
        let service = ai_service(&provider, &SuggestionEngineConfig::default());
        let result = service.suggest(&chest_pool(), &request).await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(result.suggestions.len(), 2, "fallback for {content:?}");
        assert_suggestion_invariants(&result.suggestions, None);
    }
}

#[tokio::test]
async fn test_prompt_reaches_provider_with_candidates_and_json_mode() {
    init_test_logging();
    let provider = Arc::new(MockLlmProvider::with_content(FRAGMENTED_BISETS));
    let service = ai_service(&provider, &SuggestionEngineConfig::default());
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Advanced, 3);

    let _ = service.suggest(&chest_pool(), &request).await;

    let sent = provider.last_request().unwrap();
    assert!(sent.json_mode);
    assert_eq!(sent.messages.len(), 2);
    assert!(sent.messages[1].content.contains("- ID: c0, Nome: Supino reto, Grupo: chest"));
}

#[tokio::test]
async fn test_existing_workout_exercises_are_not_suggested() {
    init_test_logging();
    let service = SuggestionService::rule_based_only();
    let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 12)
        .with_context(SuggestionContext {
            existing_exercises: vec!["Supino reto".to_owned(), "crossover".to_owned()],
            ..SuggestionContext::default()
        })
        .with_exclude_ids(["c5"]);

    let result = service.suggest(&chest_pool(), &request).await;

    let ids: HashSet<&str> = result.suggestions.iter().map(|s| s.exercise_id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["c1", "c2", "c4"]));
    assert_suggestion_invariants(&result.suggestions, None);
}

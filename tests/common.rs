// ABOUTME: Shared test utilities for the suggestion and plan integration tests
// ABOUTME: Candidate fixtures, a scripted mock LLM provider, and a suggestion invariant checker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `fitcoach_engine`

use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use fitcoach_engine::errors::{AppError, ErrorCode};
use fitcoach_engine::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use fitcoach_engine::models::{
    technique_permitted, ExerciseCandidate, Prescription, SuggestionItem, Technique,
    TechniqueWhitelist,
};
use fitcoach_engine::suggestions::rule_for;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tokio::time::sleep;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Candidate fixtures
// ============================================================================

const CHEST_NAMES: [&str; 6] = [
    "Supino reto",
    "Supino inclinado",
    "Crucifixo",
    "Crossover",
    "Flexao de braco",
    "Peck deck",
];

const BACK_NAMES: [&str; 6] = [
    "Remada curvada",
    "Puxada frontal",
    "Barra fixa",
    "Remada unilateral",
    "Pullover",
    "Remada baixa",
];

/// Six chest exercises with ids `c0..c5`
pub fn chest_pool() -> Vec<ExerciseCandidate> {
    CHEST_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| ExerciseCandidate::new(format!("c{i}"), *name, "chest"))
        .collect()
}

/// Five chest and five back exercises
pub fn chest_back_pool() -> Vec<ExerciseCandidate> {
    let mut pool: Vec<ExerciseCandidate> = chest_pool().into_iter().take(5).collect();
    pool.extend(
        BACK_NAMES
            .iter()
            .take(5)
            .enumerate()
            .map(|(i, name)| ExerciseCandidate::new(format!("b{i}"), *name, "back")),
    );
    pool
}

/// Several exercises for each of the main muscle groups, with equipment tags
pub fn full_pool() -> Vec<ExerciseCandidate> {
    let groups: [(&str, &[(&str, &str)]); 10] = [
        (
            "chest",
            &[
                ("Supino reto", "barbell"),
                ("Supino inclinado com halteres", "dumbbells"),
                ("Crucifixo", "dumbbells"),
                ("Crossover", "cable"),
                ("Flexao de braco", ""),
            ],
        ),
        (
            "back",
            &[
                ("Remada curvada", "barbell"),
                ("Puxada frontal", "cable"),
                ("Barra fixa", ""),
                ("Remada unilateral", "dumbbells"),
                ("Remada elastica", "resistance_band"),
            ],
        ),
        (
            "shoulders",
            &[
                ("Desenvolvimento militar", "barbell"),
                ("Elevacao lateral", "dumbbells"),
                ("Elevacao frontal", "dumbbells"),
                ("Face pull", "cable"),
            ],
        ),
        (
            "quadriceps",
            &[
                ("Agachamento livre", "barbell"),
                ("Leg press", "machine"),
                ("Cadeira extensora", "machine"),
                ("Afundo", ""),
            ],
        ),
        (
            "hamstrings",
            &[("Mesa flexora", "machine"), ("Stiff", "barbell")],
        ),
        (
            "glutes",
            &[("Elevacao pelvica", "barbell"), ("Cadeira abdutora", "machine")],
        ),
        (
            "calves",
            &[("Panturrilha em pe", "machine"), ("Panturrilha sentado", "machine")],
        ),
        (
            "biceps",
            &[
                ("Rosca direta", "barbell"),
                ("Rosca alternada", "dumbbells"),
                ("Rosca martelo", "dumbbells"),
            ],
        ),
        (
            "triceps",
            &[
                ("Triceps corda", "cable"),
                ("Triceps testa", "barbell"),
                ("Mergulho no banco", ""),
            ],
        ),
        ("abs", &[("Abdominal supra", ""), ("Prancha", "")]),
    ];

    groups
        .iter()
        .flat_map(|(muscle, exercises)| {
            exercises.iter().enumerate().map(move |(i, (name, equipment))| {
                let candidate = ExerciseCandidate::new(format!("{muscle}-{i}"), *name, *muscle);
                if equipment.is_empty() {
                    candidate
                } else {
                    candidate.with_equipment([*equipment])
                }
            })
        })
        .collect()
}

/// Every technique the engine recognizes
pub const ALL_TECHNIQUES: [Technique; 8] = [
    Technique::Normal,
    Technique::Superset,
    Technique::Biset,
    Technique::Triset,
    Technique::Giantset,
    Technique::Dropset,
    Technique::RestPause,
    Technique::Cluster,
];

/// A malformed draft: random techniques and group ids over part of the pool
pub fn random_draft(rng: &mut ChaCha8Rng, pool: &[ExerciseCandidate]) -> Vec<SuggestionItem> {
    let size = rng.gen_range(1..=12);
    let picks: Vec<&ExerciseCandidate> = pool.choose_multiple(rng, size).collect();
    let group_ids = ["g0", "g1", "g2", "g3"];
    let prescription = Prescription::new(4, "8-12", 75);

    picks
        .into_iter()
        .map(|candidate| {
            let technique = *ALL_TECHNIQUES.choose(rng).unwrap();
            let group = if rng.gen_bool(0.7) {
                group_ids.choose(rng).copied()
            } else {
                None
            };
            let item = SuggestionItem::from_candidate(candidate, &prescription, "teste")
                .with_technique(technique);
            match group {
                Some(group) => item.in_group(group, rng.gen_range(0..4)),
                None => item,
            }
        })
        .collect()
}

// ============================================================================
// Mock LLM provider
// ============================================================================

/// What the mock provider does when called
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this content
    Content(String),
    /// Fail with a rate-limit error
    RateLimited,
    /// Sleep before answering
    Slow(Duration, String),
}

/// Scripted LLM provider recording every request
pub struct MockLlmProvider {
    reply: MockReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockLlmProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self::new(MockReply::Content(content.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn response(content: String) -> ChatResponse {
        ChatResponse {
            content,
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::hosted()
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            MockReply::Content(content) => Ok(Self::response(content.clone())),
            MockReply::RateLimited => Err(AppError::new(
                ErrorCode::ExternalRateLimited,
                "mock: rate limit exceeded",
            )),
            MockReply::Slow(delay, content) => {
                sleep(*delay).await;
                Ok(Self::response(content.clone()))
            }
        }
    }
}

// ============================================================================
// Invariant checks
// ============================================================================

/// Assert every structural guarantee of a final suggestion list
pub fn assert_suggestion_invariants(items: &[SuggestionItem], whitelist: Option<&TechniqueWhitelist>) {
    let mut ids = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        assert_eq!(item.order, index, "order indices must be 0..n-1");
        assert!(ids.insert(item.exercise_id.clone()), "duplicate id {}", item.exercise_id);
        if !item.technique.is_group() {
            assert!(item.group_id.is_none(), "{} carries a group id", item.technique);
        }
    }

    let mut groups: HashMap<&str, Vec<&SuggestionItem>> = HashMap::new();
    for item in items {
        if let Some(group_id) = item.group_id.as_deref() {
            groups.entry(group_id).or_default().push(item);
        }
    }

    for members in groups.values() {
        assert_group(members, whitelist);
    }
}

fn assert_group(members: &[&SuggestionItem], whitelist: Option<&TechniqueWhitelist>) {
    let technique = members[0].technique;
    assert!(members.iter().all(|m| m.technique == technique), "mixed techniques in group");

    let mut sorted: Vec<&SuggestionItem> = members.to_vec();
    sorted.sort_by_key(|m| m.group_order);
    for (position, member) in sorted.iter().enumerate() {
        assert_eq!(member.group_order, position, "group order must be contiguous");
        if position + 1 == sorted.len() {
            assert!((60..=90).contains(&member.rest_seconds), "last member rest {}", member.rest_seconds);
        } else {
            assert_eq!(member.rest_seconds, 0, "non-last member must not rest");
        }
    }

    let orders: Vec<usize> = sorted.iter().map(|m| m.order).collect();
    assert!(orders.windows(2).all(|w| w[1] == w[0] + 1), "group must be contiguous");

    if !technique_permitted(whitelist, Technique::Normal) {
        return;
    }
    let rule = rule_for(technique).unwrap();
    let muscles: Vec<&str> = sorted.iter().map(|m| m.muscle_group.as_str()).collect();
    assert!(rule.is_satisfied_by(&muscles), "invalid {technique} group {muscles:?}");
}

// ABOUTME: Rule-based exercise selector used as the always-available fallback
// ABOUTME: Goal lookup prescriptions, even muscle distribution, dropset tagging, seeded randomness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::SuggestionEngineConfig;
use crate::models::{
    technique_permitted, Difficulty, ExerciseCandidate, SuggestionItem, SuggestionRequest,
    Technique, TechniqueWhitelist, WorkoutGoal,
};

use super::catalog::instructions_for;
use super::generator::{DraftSuggestions, ExercisePlanGenerator, GenerationError, GoalProfile};
use super::paired::generate_paired;

/// Deterministic selector driven by the goal lookup table
///
/// Randomness only affects paired-generation order and is seedable for tests.
pub struct RuleBasedGenerator {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for RuleBasedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedGenerator {
    /// Create a generator seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Create a generator with a fixed seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Create a generator honoring the configured seed
    #[must_use]
    pub fn from_config(config: &SuggestionEngineConfig) -> Self {
        config.rng_seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Produce a draft without any external call
    #[must_use]
    pub fn generate(
        &self,
        candidates: &[ExerciseCandidate],
        request: &SuggestionRequest,
    ) -> DraftSuggestions {
        let whitelist = request.technique_whitelist();

        if let Some(whitelist) = whitelist.filter(|w| w.only_group_techniques()) {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            return generate_paired(candidates, request, whitelist, &mut rng);
        }

        let draft = distribute(candidates, request, whitelist);
        debug!(
            items = draft.items.len(),
            requested = request.clamped_count(),
            "Rule-based draft generated"
        );
        draft
    }
}

#[async_trait]
impl ExercisePlanGenerator for RuleBasedGenerator {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    async fn draft(
        &self,
        candidates: &[ExerciseCandidate],
        request: &SuggestionRequest,
    ) -> Result<DraftSuggestions, GenerationError> {
        Ok(self.generate(candidates, request))
    }
}

fn styled(item: SuggestionItem, technique: Technique) -> SuggestionItem {
    let item = item.with_technique(technique);
    match instructions_for(technique) {
        Some(instructions) => item.with_instructions(instructions),
        None => item,
    }
}

fn resolve_technique(technique: Technique, whitelist: Option<&TechniqueWhitelist>) -> Technique {
    whitelist.map_or(technique, |w| w.enforce(technique))
}

/// Spread the requested count evenly over the muscle groups, then top up
fn distribute(
    candidates: &[ExerciseCandidate],
    request: &SuggestionRequest,
    whitelist: Option<&TechniqueWhitelist>,
) -> DraftSuggestions {
    let profile = GoalProfile::for_goal(request.goal);
    let prescription = profile.prescription();
    let count = request.clamped_count();
    let existing = request.existing_exercise_names();
    let per_group = (count / request.muscle_groups.len().max(1)).max(1);
    let dropsets = request.allow_advanced_techniques
        && request.difficulty == Difficulty::Advanced
        && request.goal == WorkoutGoal::Hypertrophy
        && technique_permitted(whitelist, Technique::Dropset);

    let mut items: Vec<SuggestionItem> = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();
    let available = |c: &ExerciseCandidate, used: &HashSet<&str>| {
        !used.contains(c.id.as_str()) && !existing.contains(&c.name.to_lowercase())
    };

    for muscle in &request.muscle_groups {
        let picks: Vec<&ExerciseCandidate> = candidates
            .iter()
            .filter(|c| c.targets(muscle) && available(c, &used))
            .take(per_group)
            .collect();

        for (position, candidate) in picks.into_iter().enumerate() {
            let is_last_of_muscle = position + 1 == per_group;
            let (technique, reason) = if dropsets && is_last_of_muscle {
                (
                    Technique::Dropset,
                    format!("Dropset para maxima hipertrofia em {}", candidate.muscle_group),
                )
            } else {
                (
                    Technique::Normal,
                    format!("Exercicio para {}", candidate.muscle_group),
                )
            };
            let item = SuggestionItem::from_candidate(candidate, &prescription, reason);
            items.push(styled(item, resolve_technique(technique, whitelist)));
            used.insert(candidate.id.as_str());
        }
    }

    for candidate in candidates {
        if items.len() >= count {
            break;
        }
        if !available(candidate, &used) {
            continue;
        }
        let item = SuggestionItem::from_candidate(
            candidate,
            &prescription,
            format!("Exercicio complementar para {}", candidate.muscle_group),
        );
        items.push(styled(item, resolve_technique(Technique::Normal, whitelist)));
        used.insert(candidate.id.as_str());
    }

    items.truncate(count);
    for (order, item) in items.iter_mut().enumerate() {
        item.order = order;
    }

    DraftSuggestions {
        items,
        message: profile.message.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestionContext;

    fn chest_pool() -> Vec<ExerciseCandidate> {
        [
            "Supino reto",
            "Supino inclinado",
            "Crucifixo",
            "Crossover",
            "Flexao de braco",
            "Peck deck",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| ExerciseCandidate::new(format!("c{i}"), *name, "chest"))
        .collect()
    }

    #[test]
    fn test_advanced_hypertrophy_gets_one_dropset() {
        let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Advanced, 6);
        let draft = RuleBasedGenerator::with_seed(1).generate(&chest_pool(), &request);

        assert_eq!(draft.items.len(), 6);
        let dropsets: Vec<&SuggestionItem> = draft
            .items
            .iter()
            .filter(|i| i.technique == Technique::Dropset)
            .collect();
        assert_eq!(dropsets.len(), 1);
        assert_eq!(dropsets[0].exercise_id, "c5");
        assert!(draft.items.iter().all(|i| i.sets == 4 && i.reps == "8-12" && i.rest_seconds == 60));
    }

    #[test]
    fn test_existing_exercises_are_skipped() {
        let request = SuggestionRequest::new(["chest"], WorkoutGoal::Strength, Difficulty::Beginner, 3)
            .with_context(SuggestionContext {
                existing_exercises: vec!["SUPINO RETO".to_owned()],
                ..SuggestionContext::default()
            });
        let draft = RuleBasedGenerator::with_seed(1).generate(&chest_pool(), &request);
        assert_eq!(draft.items.len(), 3);
        assert!(draft.items.iter().all(|i| i.exercise_id != "c0"));
        assert_eq!(draft.message, "Priorize cargas pesadas com descanso adequado.");
    }

    #[test]
    fn test_whitelist_replaces_normal() {
        let request = SuggestionRequest::new(["chest"], WorkoutGoal::Hypertrophy, Difficulty::Intermediate, 2)
            .with_allowed_techniques(["rest_pause", "cluster"]);
        let draft = RuleBasedGenerator::with_seed(1).generate(&chest_pool(), &request);
        assert!(draft.items.iter().all(|i| i.technique == Technique::RestPause));
        assert!(draft.items[0].execution_instructions.is_some());
    }
}

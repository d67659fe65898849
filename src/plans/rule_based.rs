// ABOUTME: Rule-based training plan generator used when no LLM is available or it fails
// ABOUTME: Split structure, goal prescriptions, seeded technique rolls, then repair and ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::SuggestionEngineConfig;
use crate::constants::limits::{
    MAX_EXERCISES_PER_WORKOUT, MINUTES_PER_EXERCISE, MIN_EXERCISES_PER_WORKOUT,
};
use crate::constants::messages::{BISET_INSTRUCTIONS, PLAN_REVIEW_MESSAGE};
use crate::models::{
    generate_group_id, Difficulty, ExerciseCandidate, GeneratedPlan, PlanRequest, PlannedWorkout,
    Prescription, SplitType, SuggestionItem, Technique, WorkoutGoal,
};
use crate::suggestions::{order_suggestions, repair_groups, GenerationError, UnusedPool};

use super::filter::filter_for_plan;
use super::split::{goal_label, plan_muscle, workout_structure, WorkoutSlot};
use super::TrainingPlanGenerator;

const PLAN_DROPSET_INSTRUCTIONS: &str = "Reduza a carga em 20-30% a cada drop. Faca 2-3 drops.";
const PLAN_REST_PAUSE_INSTRUCTIONS: &str = "Faca ate a falha, descanse 10-15s, repita 2-3 vezes.";
const ISOMETRIC_HOLDS: [u32; 3] = [3, 5, 7];

/// Sets, reps, and rest for plan workouts
#[must_use]
pub fn plan_prescription(goal: WorkoutGoal) -> Prescription {
    match goal {
        WorkoutGoal::Hypertrophy => Prescription::new(4, "8-12", 90),
        WorkoutGoal::Strength => Prescription::new(5, "3-5", 180),
        WorkoutGoal::FatLoss => Prescription::new(3, "12-15", 45),
        WorkoutGoal::Endurance => Prescription::new(3, "15-20", 30),
        WorkoutGoal::GeneralFitness | WorkoutGoal::Functional => Prescription::new(3, "10-12", 60),
    }
}

/// Exercises that fit a session length
#[must_use]
pub fn exercises_per_workout(minutes_per_session: u32) -> usize {
    let by_time = usize::try_from(minutes_per_session / MINUTES_PER_EXERCISE).unwrap_or(usize::MAX);
    by_time.clamp(MIN_EXERCISES_PER_WORKOUT, MAX_EXERCISES_PER_WORKOUT)
}

/// Intensity technique rolled for one muscle group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MuscleTechnique {
    Plain,
    Dropset,
    Biset,
    Isometric(u32),
    RestPause,
}

impl MuscleTechnique {
    fn roll(rng: &mut ChaCha8Rng, available: usize) -> Self {
        let roll: f64 = rng.gen();
        if roll < 0.3 {
            Self::Dropset
        } else if roll < 0.5 && available >= 2 {
            Self::Biset
        } else if roll < 0.65 {
            Self::Isometric(ISOMETRIC_HOLDS.choose(rng).copied().unwrap_or(5))
        } else if roll < 0.75 {
            Self::RestPause
        } else {
            Self::Plain
        }
    }

    /// Style the last exercise of a muscle group
    fn apply(self, item: SuggestionItem, muscle: &str) -> SuggestionItem {
        match self {
            Self::Dropset => SuggestionItem {
                reason: format!("Exercicio para {muscle} com dropset"),
                ..item.with_technique(Technique::Dropset)
            }
            .with_instructions(PLAN_DROPSET_INSTRUCTIONS),
            Self::RestPause => SuggestionItem {
                reason: format!("Exercicio para {muscle} com rest_pause"),
                ..item.with_technique(Technique::RestPause)
            }
            .with_instructions(PLAN_REST_PAUSE_INSTRUCTIONS),
            Self::Isometric(seconds) => SuggestionItem {
                reason: format!("Exercicio para {muscle} com isometria"),
                isometric_seconds: Some(seconds),
                ..item
            }
            .with_instructions(format!("Pause por {seconds}s na contracao maxima.")),
            Self::Plain | Self::Biset => item,
        }
    }
}

/// Deterministic plan builder with seedable technique rolls
pub struct PlanGenerator {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanGenerator {
    /// Generator seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Generator with a fixed seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Generator honoring the configured seed
    #[must_use]
    pub fn from_config(config: &SuggestionEngineConfig) -> Self {
        config.rng_seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Build a plan from `pool`
    #[must_use]
    pub fn generate(&self, pool: &[ExerciseCandidate], request: &PlanRequest) -> GeneratedPlan {
        let split_type = SplitType::for_days(request.days_per_week);
        let candidates = filter_for_plan(pool, request.equipment, &request.injuries);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let workouts: Vec<PlannedWorkout> = workout_structure(split_type, request.days_per_week)
            .iter()
            .enumerate()
            .map(|(order, slot)| build_workout(order, slot, &candidates, request, &mut rng))
            .collect();

        debug!(
            split = %split_type,
            workouts = workouts.len(),
            candidates = candidates.len(),
            "Rule-based plan generated"
        );

        plan_shell(request, split_type, workouts)
    }
}

#[async_trait]
impl TrainingPlanGenerator for PlanGenerator {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    async fn generate_plan(
        &self,
        pool: &[ExerciseCandidate],
        request: &PlanRequest,
    ) -> Result<GeneratedPlan, GenerationError> {
        Ok(self.generate(pool, request))
    }
}

/// Plan name, description, and message around a set of workouts
#[must_use]
pub fn plan_shell(
    request: &PlanRequest,
    split_type: SplitType,
    workouts: Vec<PlannedWorkout>,
) -> GeneratedPlan {
    let label = goal_label(request.goal);
    GeneratedPlan {
        name: format!("Plano {label} {}x", request.days_per_week),
        description: format!(
            "Plano de {} semanas focado em {}.",
            request.duration_weeks,
            label.to_lowercase()
        ),
        goal: request.goal,
        difficulty: request.difficulty,
        split_type,
        duration_weeks: request.duration_weeks,
        workouts,
        message: PLAN_REVIEW_MESSAGE.to_owned(),
    }
}

/// Repair technique groups and order one workout's exercises
#[must_use]
pub fn finish_workout(
    items: Vec<SuggestionItem>,
    candidates: &[ExerciseCandidate],
) -> Vec<SuggestionItem> {
    let mut unused = UnusedPool::new(candidates, &items);
    order_suggestions(repair_groups(items, &mut unused, None))
}

fn build_workout(
    order: usize,
    slot: &WorkoutSlot,
    candidates: &[ExerciseCandidate],
    request: &PlanRequest,
    rng: &mut ChaCha8Rng,
) -> PlannedWorkout {
    let items = select_for_workout(candidates, slot.muscles, request, rng);
    PlannedWorkout {
        label: slot.label.to_owned(),
        name: slot.name.to_owned(),
        order,
        target_muscles: slot.muscles.iter().map(|m| (*m).to_owned()).collect(),
        exercises: finish_workout(items, candidates),
    }
}

fn biset(members: &[ExerciseCandidate], muscle: &str, prescription: &Prescription) -> Vec<SuggestionItem> {
    let group_id = generate_group_id();
    members
        .iter()
        .enumerate()
        .map(|(position, candidate)| {
            let rest = if position == 0 { 0 } else { prescription.rest_seconds };
            SuggestionItem::from_candidate(candidate, prescription, format!("Bi-set para {muscle}"))
                .with_technique(Technique::Biset)
                .in_group(&group_id, position)
                .with_rest(rest)
                .with_instructions(BISET_INSTRUCTIONS)
        })
        .collect()
}

fn select_for_workout(
    candidates: &[ExerciseCandidate],
    muscles: &[&str],
    request: &PlanRequest,
    rng: &mut ChaCha8Rng,
) -> Vec<SuggestionItem> {
    let prescription = plan_prescription(request.goal);
    let per_muscle = (exercises_per_workout(request.minutes_per_session) / muscles.len().max(1)).max(1);
    let advanced = request.difficulty == Difficulty::Advanced
        && matches!(request.goal, WorkoutGoal::Hypertrophy | WorkoutGoal::Strength);

    let mut selected: Vec<SuggestionItem> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for muscle in muscles {
        let Some(group) = plan_muscle(muscle) else {
            continue;
        };
        let mut available: Vec<ExerciseCandidate> = candidates
            .iter()
            .filter(|c| c.targets(group) && !used.contains(&c.id))
            .cloned()
            .collect();
        if available.is_empty() {
            continue;
        }
        available.shuffle(rng);

        let technique = if advanced {
            MuscleTechnique::roll(rng, available.len())
        } else {
            MuscleTechnique::Plain
        };

        let picked = if technique == MuscleTechnique::Biset {
            biset(&available[..2], muscle, &prescription)
        } else {
            let take = per_muscle.min(available.len());
            available[..take]
                .iter()
                .enumerate()
                .map(|(index, candidate)| {
                    let item = SuggestionItem::from_candidate(
                        candidate,
                        &prescription,
                        format!("Exercicio para {muscle}"),
                    );
                    if index + 1 == take {
                        technique.apply(item, muscle)
                    } else {
                        item
                    }
                })
                .collect()
        };

        used.extend(picked.iter().map(|item| item.exercise_id.clone()));
        selected.extend(picked);
    }

    for (order, item) in selected.iter_mut().enumerate() {
        item.order = order;
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_count_from_minutes() {
        assert_eq!(exercises_per_workout(20), 4);
        assert_eq!(exercises_per_workout(48), 6);
        assert_eq!(exercises_per_workout(120), 8);
    }

    #[test]
    fn test_prescription_table() {
        assert_eq!(plan_prescription(WorkoutGoal::Strength), Prescription::new(5, "3-5", 180));
        assert_eq!(plan_prescription(WorkoutGoal::Functional), Prescription::new(3, "10-12", 60));
    }

    #[test]
    fn test_plan_shell_naming() {
        let request = PlanRequest::new(WorkoutGoal::Hypertrophy, Difficulty::Beginner, 3, 60);
        let plan = plan_shell(&request, SplitType::Abc, Vec::new());
        assert_eq!(plan.name, "Plano Hipertrofia 3x");
        assert_eq!(plan.description, "Plano de 8 semanas focado em hipertrofia.");
        assert_eq!(plan.message, PLAN_REVIEW_MESSAGE);
    }
}

// ABOUTME: Paired-generation mode of the rule-based selector for group-only technique whitelists
// ABOUTME: Builds supersets across muscle groups, same-muscle bi/tri-sets, and shuffled giant sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::models::{
    generate_group_id, ExerciseCandidate, Prescription, SuggestionItem, SuggestionRequest,
    Technique, TechniqueWhitelist,
};

use super::generator::{DraftSuggestions, GoalProfile};
use super::prompt::paired_technique;

/// Candidates of one requested muscle group, in pool order
struct MuscleBucket {
    muscle: String,
    exercises: VecDeque<ExerciseCandidate>,
}

fn buckets(
    candidates: &[ExerciseCandidate],
    muscle_groups: &[String],
    existing_names: &HashSet<String>,
) -> Vec<MuscleBucket> {
    let mut buckets: Vec<MuscleBucket> = Vec::new();
    for muscle in muscle_groups {
        let key = muscle.to_lowercase();
        if buckets.iter().any(|b| b.muscle == key) {
            continue;
        }
        let exercises: VecDeque<ExerciseCandidate> = candidates
            .iter()
            .filter(|c| c.targets(&key) && !existing_names.contains(&c.name.to_lowercase()))
            .cloned()
            .collect();
        if !exercises.is_empty() {
            buckets.push(MuscleBucket {
                muscle: key,
                exercises,
            });
        }
    }
    buckets
}

/// Turn a chunk of candidates into one group
fn build_group(
    members: &[ExerciseCandidate],
    technique: Technique,
    prescription: &Prescription,
    reason: impl Fn(usize, &ExerciseCandidate) -> String,
) -> Vec<SuggestionItem> {
    let group_id = generate_group_id();
    let last = members.len().saturating_sub(1);
    members
        .iter()
        .enumerate()
        .map(|(position, candidate)| {
            let rest = if position == last {
                prescription.rest_seconds
            } else {
                0
            };
            SuggestionItem::from_candidate(candidate, prescription, reason(position, candidate))
                .with_technique(technique)
                .in_group(&group_id, position)
                .with_rest(rest)
        })
        .collect()
}

fn supersets(
    mut buckets: Vec<MuscleBucket>,
    group_count: usize,
    prescription: &Prescription,
    rng: &mut ChaCha8Rng,
) -> Vec<SuggestionItem> {
    if buckets.len() < 2 {
        let mut combined: Vec<ExerciseCandidate> = buckets
            .into_iter()
            .flat_map(|b| b.exercises)
            .collect();
        combined.shuffle(rng);
        return combined
            .chunks_exact(2)
            .take(group_count)
            .flat_map(|pair| {
                build_group(pair, Technique::Superset, prescription, |position, _| {
                    format!("Superset - exercicio {}", position + 1)
                })
            })
            .collect();
    }

    let mut items = Vec::new();
    let muscle_count = buckets.len();
    let mut index = 0;
    for _ in 0..group_count {
        let first = index % muscle_count;
        let second = (index + 1) % muscle_count;
        index += 2;

        if buckets[first].exercises.is_empty() || buckets[second].exercises.is_empty() {
            continue;
        }
        let (Some(a), Some(b)) = (
            buckets[first].exercises.pop_front(),
            buckets[second].exercises.pop_front(),
        ) else {
            continue;
        };
        items.extend(build_group(
            &[a, b],
            Technique::Superset,
            prescription,
            |_, candidate| format!("Superset - {}", candidate.muscle_group),
        ));
    }
    items
}

fn same_muscle_groups(
    mut buckets: Vec<MuscleBucket>,
    technique: Technique,
    group_size: usize,
    group_count: usize,
    prescription: &Prescription,
) -> Vec<SuggestionItem> {
    let mut items = Vec::new();
    let mut cursor = 0;
    for _ in 0..group_count {
        buckets.retain(|b| b.exercises.len() >= group_size);
        if buckets.is_empty() {
            break;
        }
        let slot = cursor % buckets.len();
        let bucket = &mut buckets[slot];
        let members: Vec<ExerciseCandidate> = bucket.exercises.drain(..group_size).collect();
        items.extend(build_group(
            &members,
            technique,
            prescription,
            |position, candidate| {
                format!(
                    "{} de {} - exercicio {}",
                    technique.capitalized(),
                    candidate.muscle_group,
                    position + 1
                )
            },
        ));
        cursor += 1;
    }
    items
}

fn giantsets(
    buckets: Vec<MuscleBucket>,
    group_size: usize,
    group_count: usize,
    prescription: &Prescription,
    rng: &mut ChaCha8Rng,
) -> Vec<SuggestionItem> {
    let mut combined: Vec<ExerciseCandidate> =
        buckets.into_iter().flat_map(|b| b.exercises).collect();
    combined.shuffle(rng);
    combined
        .chunks_exact(group_size)
        .take(group_count)
        .flat_map(|chunk| {
            build_group(chunk, Technique::Giantset, prescription, |position, _| {
                format!("Giant set - exercicio {}", position + 1)
            })
        })
        .collect()
}

/// Generate a draft made only of technique groups
///
/// Produces `count / group_size` groups at most and under-fills rather than
/// failing when the pool is too small.
pub fn generate_paired(
    candidates: &[ExerciseCandidate],
    request: &SuggestionRequest,
    whitelist: &TechniqueWhitelist,
    rng: &mut ChaCha8Rng,
) -> DraftSuggestions {
    let profile = GoalProfile::for_goal(request.goal);
    let prescription = profile.prescription();
    let count = request.clamped_count();
    let (technique, group_size) = paired_technique(whitelist);
    let group_count = count / group_size;
    let buckets = buckets(
        candidates,
        &request.muscle_groups,
        &request.existing_exercise_names(),
    );

    let mut items = match technique {
        Technique::Superset => supersets(buckets, group_count, &prescription, rng),
        Technique::Giantset => giantsets(buckets, group_size, group_count, &prescription, rng),
        _ => same_muscle_groups(buckets, technique, group_size, group_count, &prescription),
    };
    items.truncate(count);
    for (order, item) in items.iter_mut().enumerate() {
        item.order = order;
    }

    DraftSuggestions {
        items,
        message: format!("Treino com {technique}s para maior intensidade."),
    }
}

// ABOUTME: Variety enforcement making every whitelisted technique appear in the final list
// ABOUTME: Synthesizes missing groups from unused candidates and converts or appends single techniques
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use tracing::debug;

use crate::models::{
    generate_group_id, ExerciseCandidate, Prescription, SuggestionItem, Technique,
    TechniqueWhitelist,
};

use super::catalog::{antagonist_of, clamp_group_rest, instructions_for, rule_for, MusclePairing, TechniqueRule};
use super::pool::UnusedPool;

fn variety_reason(technique: Technique) -> String {
    format!("{} adicionado para variar as tecnicas", technique.capitalized())
}

/// Requested muscles first, then whatever else the pool still holds
fn muscle_preference(muscle_groups: &[String], unused: &UnusedPool) -> Vec<String> {
    let mut muscles: Vec<String> = Vec::new();
    for muscle in muscle_groups
        .iter()
        .map(|m| m.to_lowercase())
        .chain(unused.muscle_keys())
    {
        if !muscles.contains(&muscle) {
            muscles.push(muscle);
        }
    }
    muscles
}

fn take_group_members(
    rule: &TechniqueRule,
    unused: &mut UnusedPool,
    muscle_groups: &[String],
) -> Option<Vec<ExerciseCandidate>> {
    let size = rule.size.min();
    let muscles = muscle_preference(muscle_groups, unused);

    match rule.pairing {
        MusclePairing::Same => {
            let muscle = muscles.iter().find(|m| unused.count_for(m) >= size)?;
            unused.take_many_for(muscle, size)
        }
        MusclePairing::Antagonist => {
            let (first, second) = muscles.iter().find_map(|m| {
                let other = antagonist_of(m)?;
                (unused.count_for(m) > 0 && unused.count_for(other) > 0).then(|| (m.clone(), other))
            })?;
            let first = unused.take_for(&first)?;
            let second = unused.take_for(second)?;
            Some(vec![first, second])
        }
        MusclePairing::Any => {
            let requested: Vec<String> = muscle_groups.iter().map(|m| m.to_lowercase()).collect();
            unused.take_many_preferring(&requested, size)
        }
    }
}

fn synthesize_group(
    rule: &TechniqueRule,
    unused: &mut UnusedPool,
    muscle_groups: &[String],
    prescription: &Prescription,
) -> Option<Vec<SuggestionItem>> {
    let members = take_group_members(rule, unused, muscle_groups)?;
    let group_id = generate_group_id();
    let last = members.len().saturating_sub(1);
    Some(
        members
            .iter()
            .enumerate()
            .map(|(position, candidate)| {
                let rest = if position == last {
                    clamp_group_rest(prescription.rest_seconds)
                } else {
                    0
                };
                SuggestionItem::from_candidate(candidate, prescription, variety_reason(rule.technique))
                    .with_technique(rule.technique)
                    .in_group(&group_id, position)
                    .with_rest(rest)
            })
            .collect(),
    )
}

fn with_technique_style(item: SuggestionItem, technique: Technique) -> SuggestionItem {
    let item = item.with_technique(technique);
    match instructions_for(technique) {
        Some(instructions) => item.with_instructions(instructions),
        None => item,
    }
}

/// Convert a plain item in place, or append a fresh one from the pool
fn satisfy_single(
    items: &mut Vec<SuggestionItem>,
    technique: Technique,
    normal_whitelisted: bool,
    unused: &mut UnusedPool,
    muscle_groups: &[String],
    prescription: &Prescription,
) -> bool {
    let normals: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.technique == Technique::Normal && !item.is_grouped())
        .map(|(index, _)| index)
        .collect();
    let keep = usize::from(normal_whitelisted);

    if normals.len() > keep {
        if let Some(&index) = normals.last() {
            items[index] = with_technique_style(items[index].clone(), technique);
            return true;
        }
    }

    let candidate = muscle_groups
        .iter()
        .find_map(|muscle| unused.take_for(muscle))
        .or_else(|| unused.take_any());
    let Some(candidate) = candidate else {
        return false;
    };
    let item = SuggestionItem::from_candidate(&candidate, prescription, variety_reason(technique));
    items.push(with_technique_style(item, technique));
    true
}

/// Make sure every whitelisted technique shows up at least once
///
/// Only runs for whitelists with more than one entry. Techniques that cannot
/// be satisfied from the remaining pool are left out silently.
#[must_use]
pub fn ensure_variety(
    mut items: Vec<SuggestionItem>,
    unused: &mut UnusedPool,
    whitelist: Option<&TechniqueWhitelist>,
    muscle_groups: &[String],
    prescription: &Prescription,
) -> Vec<SuggestionItem> {
    let Some(whitelist) = whitelist.filter(|w| w.len() > 1) else {
        return items;
    };

    let present: HashSet<Technique> = items.iter().map(|item| item.technique).collect();
    let missing: Vec<Technique> = whitelist.iter().filter(|t| !present.contains(t)).collect();

    for technique in missing {
        let satisfied = match rule_for(technique) {
            Some(rule) => match synthesize_group(rule, unused, muscle_groups, prescription) {
                Some(group) => {
                    items.extend(group);
                    true
                }
                None => false,
            },
            None => satisfy_single(
                &mut items,
                technique,
                whitelist.permits_normal(),
                unused,
                muscle_groups,
                prescription,
            ),
        };
        debug!(technique = %technique, satisfied, "Variety check for whitelisted technique");
    }

    for (order, item) in items.iter_mut().enumerate() {
        item.order = order;
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prescription() -> Prescription {
        Prescription::new(3, "10-12", 60)
    }

    fn normal(id: &str, muscle: &str) -> SuggestionItem {
        SuggestionItem::from_candidate(&ExerciseCandidate::new(id, format!("Ex {id}"), muscle), &prescription(), "teste")
    }

    #[test]
    fn test_single_whitelist_entry_is_a_no_op() {
        let whitelist = TechniqueWhitelist::from_names(["dropset"]);
        let items = vec![normal("c1", "chest")];
        let result = ensure_variety(items.clone(), &mut UnusedPool::default(), Some(&whitelist), &[], &prescription());
        assert_eq!(result, items);
    }

    #[test]
    fn test_normal_converted_but_last_normal_kept() {
        let whitelist = TechniqueWhitelist::from_names(["normal", "dropset"]);
        let items = vec![normal("c1", "chest"), normal("c2", "chest")];
        let result = ensure_variety(items, &mut UnusedPool::default(), Some(&whitelist), &[], &prescription());
        assert_eq!(result[0].technique, Technique::Normal);
        assert_eq!(result[1].technique, Technique::Dropset);
        assert!(result[1].execution_instructions.is_some());

        let items = vec![normal("c1", "chest")];
        let result = ensure_variety(items, &mut UnusedPool::default(), Some(&whitelist), &[], &prescription());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].technique, Technique::Normal);
    }

    #[test]
    fn test_missing_superset_synthesized_from_antagonists() {
        let whitelist = TechniqueWhitelist::from_names(["dropset", "superset"]);
        let items = vec![normal("c1", "chest").with_technique(Technique::Dropset)];
        let pool = [
            ExerciseCandidate::new("c2", "Crucifixo", "chest"),
            ExerciseCandidate::new("b1", "Remada", "back"),
        ];
        let mut unused = UnusedPool::new(&pool, &items);
        let muscles = vec!["chest".to_owned()];
        let result = ensure_variety(items, &mut unused, Some(&whitelist), &muscles, &prescription());

        assert_eq!(result.len(), 3);
        assert_eq!(result[1].technique, Technique::Superset);
        assert_eq!(result[1].group_id, result[2].group_id);
        assert_eq!(result[1].rest_seconds, 0);
        assert_eq!(result[2].muscle_group, "back");
        assert_eq!(result[2].order, 2);
        assert!(unused.is_empty());
    }

    #[test]
    fn test_unsatisfiable_group_left_out() {
        let whitelist = TechniqueWhitelist::from_names(["normal", "triset"]);
        let items = vec![normal("c1", "chest")];
        let pool = [ExerciseCandidate::new("c2", "Crucifixo", "chest")];
        let mut unused = UnusedPool::new(&pool, &items);
        let result = ensure_variety(items, &mut unused, Some(&whitelist), &["chest".to_owned()], &prescription());
        assert_eq!(result.len(), 1);
        assert_eq!(unused.len(), 1);
    }
}

// ABOUTME: Group repair engine enforcing technique group sizes and muscle pairing on draft lists
// ABOUTME: Sanitizes, adopts orphans, merges incomplete groups, backfills, splits, and demotes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Group Repair
//!
//! Takes a possibly malformed draft and returns a list in which every technique
//! group matches the constraint catalog, or has been demoted to plain sets.
//! Never fails and never drops an exercise, except duplicate ids.
//!
//! Stages, in order:
//! 1. sanitize (duplicate ids, stray group ids on single techniques, mixed techniques)
//! 2. adopt orphans (group technique without group id)
//! 3. bucket groups into complete and incomplete
//! 4. merge incomplete members per technique and re-partition them
//! 5. resolve each group: keep, split, backfill, or demote
//! 6. normalize intra-group order and rest, then renumber

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::models::{
    generate_group_id, technique_permitted, ExerciseCandidate, Prescription, SuggestionItem,
    Technique, TechniqueWhitelist,
};

use super::catalog::{antagonist_of, clamp_group_rest, rule_for, MusclePairing, TechniqueRule};
use super::pool::UnusedPool;

/// One technique group being repaired
#[derive(Debug, Clone)]
struct Group {
    id: Option<String>,
    rule: &'static TechniqueRule,
    members: Vec<SuggestionItem>,
}

impl Group {
    fn new(id: Option<String>, rule: &'static TechniqueRule, members: Vec<SuggestionItem>) -> Self {
        Self { id, rule, members }
    }

    fn technique(&self) -> Technique {
        self.rule.technique
    }

    fn muscles(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.muscle_group.as_str()).collect()
    }

    fn is_valid(&self) -> bool {
        self.rule.is_satisfied_by(&self.muscles())
    }

    /// Needs re-pairing with other groups of the same technique
    fn is_incomplete(&self) -> bool {
        let size = self.rule.size;
        let count = self.members.len();
        count < size.min() || (size.is_exact() && !self.is_valid())
    }

    /// Add candidates to reach the catalog size, all or nothing
    fn backfill(&mut self, unused: &mut UnusedPool) -> bool {
        let Some(first) = self.members.first() else {
            return false;
        };
        let needed = self.rule.size.min().saturating_sub(self.members.len());
        if needed == 0 {
            return false;
        }
        let prescription = Prescription::new(first.sets, first.reps.clone(), 0);
        let anchor = first.muscle_group.clone();

        let taken = match self.rule.pairing {
            MusclePairing::Same => unused.take_many_for(&anchor, needed),
            MusclePairing::Antagonist if needed == 1 => {
                antagonist_of(&anchor).and_then(|muscle| unused.take_for(muscle)).map(|c| vec![c])
            }
            MusclePairing::Antagonist => None,
            MusclePairing::Any => {
                let mut preferred: Vec<String> = Vec::new();
                for muscle in self.muscles() {
                    let key = muscle.to_lowercase();
                    if !preferred.contains(&key) {
                        preferred.push(key);
                    }
                }
                unused.take_many_preferring(&preferred, needed)
            }
        };

        let Some(candidates) = taken else {
            return false;
        };
        let technique = self.technique();
        self.members.extend(candidates.iter().map(|candidate| {
            backfill_item(candidate, &prescription, technique)
        }));
        true
    }

    /// Split an oversized range group into near-equal chunks
    fn split(self) -> Vec<Self> {
        let max = self.rule.size.max();
        let count = self.members.len();
        let chunks = count.div_ceil(max);
        let base = count / chunks;
        let extra = count % chunks;

        let mut members = self.members.into_iter();
        let mut groups = Vec::with_capacity(chunks);
        for index in 0..chunks {
            let take = base + usize::from(index < extra);
            let chunk: Vec<SuggestionItem> = members.by_ref().take(take).collect();
            let id = if index == 0 { self.id.clone() } else { None };
            groups.push(Self::new(id, self.rule, chunk));
        }
        groups
    }

    /// Assign group id, intra-group order, technique, and rest
    fn finalize(self) -> Vec<SuggestionItem> {
        let id = self.id.unwrap_or_else(generate_group_id);
        let technique = self.rule.technique;
        let last = self.members.len().saturating_sub(1);
        self.members
            .into_iter()
            .enumerate()
            .map(|(position, mut item)| {
                item.technique = technique;
                item.group_id = Some(id.clone());
                item.group_order = position;
                item.rest_seconds = if position == last {
                    clamp_group_rest(item.rest_seconds)
                } else {
                    0
                };
                item
            })
            .collect()
    }
}

fn backfill_item(
    candidate: &ExerciseCandidate,
    prescription: &Prescription,
    technique: Technique,
) -> SuggestionItem {
    SuggestionItem::from_candidate(
        candidate,
        prescription,
        format!("Adicionado para completar {technique}"),
    )
    .with_technique(technique)
}

// ============================================================================
// Stages
// ============================================================================

/// Drop duplicate ids, strip groups from single techniques, unify group techniques
fn sanitize(draft: Vec<SuggestionItem>) -> Vec<SuggestionItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut group_techniques: HashMap<String, Technique> = HashMap::new();

    draft
        .into_iter()
        .filter(|item| seen.insert(item.exercise_id.clone()))
        .map(|mut item| {
            if !item.technique.is_group() {
                item.clear_group();
            } else if let Some(group_id) = item.group_id.clone() {
                item.technique = *group_techniques.entry(group_id).or_insert(item.technique);
            }
            item
        })
        .collect()
}

/// Collect groups in first-appearance order, adopting orphans
fn bucket(items: Vec<SuggestionItem>) -> (Vec<Group>, Vec<SuggestionItem>) {
    let mut groups: Vec<Group> = Vec::new();
    let mut ungrouped: Vec<SuggestionItem> = Vec::new();

    for mut item in items {
        let Some(rule) = rule_for(item.technique) else {
            ungrouped.push(item);
            continue;
        };
        let group_id = match item.group_id.clone() {
            Some(id) => id,
            None => {
                let id = generate_group_id();
                item.group_id = Some(id.clone());
                id
            }
        };
        match groups
            .iter_mut()
            .find(|g| g.id.as_deref() == Some(group_id.as_str()))
        {
            Some(group) => group.members.push(item),
            None => groups.push(Group::new(Some(group_id), rule, vec![item])),
        }
    }

    for group in &mut groups {
        group.members.sort_by_key(|m| m.group_order);
    }
    (groups, ungrouped)
}

/// Members of one muscle group in arrival order
type MuscleQueues = Vec<(String, VecDeque<SuggestionItem>)>;

fn by_muscle(items: Vec<SuggestionItem>) -> MuscleQueues {
    let mut queues: MuscleQueues = Vec::new();
    for item in items {
        let key = item.muscle_group.to_lowercase();
        match queues.iter_mut().find(|(muscle, _)| *muscle == key) {
            Some((_, queue)) => queue.push_back(item),
            None => queues.push((key, VecDeque::from([item]))),
        }
    }
    queues
}

fn regroup_same_muscle(rule: &'static TechniqueRule, items: Vec<SuggestionItem>) -> Vec<Group> {
    let size = rule.size.min();
    let mut groups = Vec::new();
    for (_, queue) in by_muscle(items) {
        let members: Vec<SuggestionItem> = queue.into_iter().collect();
        for chunk in members.chunks(size) {
            groups.push(Group::new(None, rule, chunk.to_vec()));
        }
    }
    groups
}

fn regroup_antagonists(rule: &'static TechniqueRule, items: Vec<SuggestionItem>) -> Vec<Group> {
    let mut queues = by_muscle(items);
    let mut groups = Vec::new();

    for index in 0..queues.len() {
        let Some(antagonist) = antagonist_of(&queues[index].0) else {
            continue;
        };
        let Some(partner) = queues.iter().position(|(muscle, _)| muscle == antagonist) else {
            continue;
        };
        while !queues[index].1.is_empty() && !queues[partner].1.is_empty() {
            let first = queues[index].1.pop_front();
            let second = queues[partner].1.pop_front();
            if let (Some(first), Some(second)) = (first, second) {
                groups.push(Group::new(None, rule, vec![first, second]));
            }
        }
    }

    groups.extend(
        queues
            .into_iter()
            .flat_map(|(_, queue)| queue)
            .map(|item| Group::new(None, rule, vec![item])),
    );
    groups
}

/// Re-partition incomplete members per technique
fn regroup(pending: Vec<SuggestionItem>) -> Vec<Group> {
    let mut per_technique: Vec<(&'static TechniqueRule, Vec<SuggestionItem>)> = Vec::new();
    for item in pending {
        let Some(rule) = rule_for(item.technique) else {
            continue;
        };
        match per_technique.iter_mut().find(|(r, _)| r.technique == rule.technique) {
            Some((_, items)) => items.push(item),
            None => per_technique.push((rule, vec![item])),
        }
    }

    per_technique
        .into_iter()
        .flat_map(|(rule, items)| match rule.pairing {
            MusclePairing::Same => regroup_same_muscle(rule, items),
            MusclePairing::Antagonist => regroup_antagonists(rule, items),
            MusclePairing::Any => vec![Group::new(None, rule, items)],
        })
        .collect()
}

/// Outcome counters for one repair pass
#[derive(Debug, Default)]
struct RepairStats {
    kept: usize,
    backfilled: usize,
    split: usize,
    demoted: usize,
    unresolved: usize,
}

struct Resolver<'a> {
    unused: &'a mut UnusedPool,
    normal_permitted: bool,
    groups: Vec<Group>,
    ungrouped: Vec<SuggestionItem>,
    stats: RepairStats,
}

impl Resolver<'_> {
    fn resolve(&mut self, mut group: Group) {
        if group.members.len() > group.rule.size.max() && !group.rule.size.is_exact() {
            self.stats.split += 1;
            for chunk in group.split() {
                self.resolve(chunk);
            }
        } else if group.is_valid() {
            self.stats.kept += 1;
            self.groups.push(group);
        } else if group.members.len() < group.rule.size.min() && group.backfill(self.unused) {
            self.stats.backfilled += 1;
            self.groups.push(group);
        } else {
            self.give_up(group);
        }
    }

    fn give_up(&mut self, group: Group) {
        if self.normal_permitted {
            self.stats.demoted += group.members.len();
            self.ungrouped.extend(group.members.into_iter().map(|mut item| {
                item.demote();
                item
            }));
        } else {
            self.stats.unresolved += 1;
            self.groups.push(group);
        }
    }
}

/// Repair technique groups in a draft list
///
/// `unused` supplies backfill candidates and loses whatever is consumed.
/// Demotion to `normal` only happens when the whitelist permits it; otherwise
/// an unrepairable group is kept as-is.
#[must_use]
pub fn repair_groups(
    draft: Vec<SuggestionItem>,
    unused: &mut UnusedPool,
    whitelist: Option<&TechniqueWhitelist>,
) -> Vec<SuggestionItem> {
    let (groups, ungrouped) = bucket(sanitize(draft));

    let mut complete = Vec::new();
    let mut pending = Vec::new();
    for group in groups {
        if group.is_incomplete() {
            pending.extend(group.members);
        } else {
            complete.push(group);
        }
    }

    let mut resolver = Resolver {
        unused,
        normal_permitted: technique_permitted(whitelist, Technique::Normal),
        groups: Vec::new(),
        ungrouped,
        stats: RepairStats::default(),
    };
    for group in complete.into_iter().chain(regroup(pending)) {
        resolver.resolve(group);
    }

    debug!(
        kept = resolver.stats.kept,
        backfilled = resolver.stats.backfilled,
        split = resolver.stats.split,
        demoted = resolver.stats.demoted,
        unresolved = resolver.stats.unresolved,
        "Technique groups repaired"
    );

    let mut repaired: Vec<SuggestionItem> = resolver
        .groups
        .into_iter()
        .flat_map(Group::finalize)
        .collect();
    repaired.extend(resolver.ungrouped);
    for (order, item) in repaired.iter_mut().enumerate() {
        item.order = order;
    }
    repaired
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::ExerciseCandidate;

    fn item(id: &str, muscle: &str, technique: Technique, group: Option<&str>) -> SuggestionItem {
        let candidate = ExerciseCandidate::new(id, format!("Exercicio {id}"), muscle);
        let item = SuggestionItem::from_candidate(&candidate, &Prescription::new(4, "8-12", 60), "teste")
            .with_technique(technique);
        match group {
            Some(group) => item.in_group(group, 0),
            None => item,
        }
    }

    #[test]
    fn test_three_singleton_bisets_become_one_pair_and_one_normal() {
        let draft = vec![
            item("c1", "chest", Technique::Biset, Some("g1")),
            item("c2", "chest", Technique::Biset, Some("g2")),
            item("c3", "chest", Technique::Biset, Some("g3")),
        ];
        let mut unused = UnusedPool::default();
        let repaired = repair_groups(draft, &mut unused, None);

        assert_eq!(repaired.len(), 3);
        let bisets: Vec<&SuggestionItem> =
            repaired.iter().filter(|i| i.technique == Technique::Biset).collect();
        assert_eq!(bisets.len(), 2);
        assert_eq!(bisets[0].group_id, bisets[1].group_id);
        assert_eq!(bisets[0].rest_seconds, 0);
        assert_eq!(bisets[1].rest_seconds, 60);
        let normal = repaired.iter().find(|i| i.technique == Technique::Normal).unwrap();
        assert!(normal.group_id.is_none());
    }

    #[test]
    fn test_giantset_of_ten_splits_evenly() {
        let draft: Vec<SuggestionItem> = (0..10)
            .map(|i| item(&format!("e{i}"), "chest", Technique::Giantset, Some("g")))
            .collect();
        let repaired = repair_groups(draft, &mut UnusedPool::default(), None);

        let mut sizes: HashMap<String, usize> = HashMap::new();
        for item in &repaired {
            *sizes.entry(item.group_id.clone().unwrap()).or_default() += 1;
        }
        let mut sizes: Vec<usize> = sizes.into_values().collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![5, 5]);
    }

    #[test]
    fn test_superset_backfills_antagonist() {
        let draft = vec![item("c1", "chest", Technique::Superset, None)];
        let pool = vec![
            ExerciseCandidate::new("c2", "Crucifixo", "chest"),
            ExerciseCandidate::new("b1", "Remada", "back"),
        ];
        let mut unused = UnusedPool::new(&pool, &draft);
        let repaired = repair_groups(draft, &mut unused, None);

        assert_eq!(repaired.len(), 2);
        assert_eq!(repaired[1].exercise_id, "b1");
        assert_eq!(repaired[1].reason, "Adicionado para completar superset");
        assert!(unused.contains("c2"));
    }

    #[test]
    fn test_unrepairable_group_kept_when_normal_forbidden() {
        let draft = vec![item("c1", "chest", Technique::Triset, Some("g"))];
        let whitelist = TechniqueWhitelist::from_names(["triset"]);
        let repaired = repair_groups(draft, &mut UnusedPool::default(), Some(&whitelist));
        assert_eq!(repaired[0].technique, Technique::Triset);
        assert!(repaired[0].group_id.is_some());
        assert_eq!(repaired[0].rest_seconds, 60);
    }

    #[test]
    fn test_single_techniques_lose_group_and_duplicates_drop() {
        let draft = vec![
            item("c1", "chest", Technique::Dropset, Some("g")),
            item("c1", "chest", Technique::Normal, None),
        ];
        let repaired = repair_groups(draft, &mut UnusedPool::default(), None);
        assert_eq!(repaired.len(), 1);
        assert!(repaired[0].group_id.is_none());
        assert_eq!(repaired[0].technique, Technique::Dropset);
    }
}

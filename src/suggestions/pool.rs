// ABOUTME: Pool of filtered candidates not yet used by the suggestion list
// ABOUTME: Backfill source for group repair and variety enforcement with all-or-nothing takes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use crate::models::{ExerciseCandidate, SuggestionItem};

/// Candidates still available for backfill, in caller order
#[derive(Debug, Clone, Default)]
pub struct UnusedPool {
    candidates: Vec<ExerciseCandidate>,
}

impl UnusedPool {
    /// Pool of `candidates` whose ids do not appear in `used`
    #[must_use]
    pub fn new(candidates: &[ExerciseCandidate], used: &[SuggestionItem]) -> Self {
        let used_ids: HashSet<&str> = used.iter().map(|item| item.exercise_id.as_str()).collect();
        Self {
            candidates: candidates
                .iter()
                .filter(|c| !used_ids.contains(c.id.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Drop candidates whose lowercased name is in `names`
    #[must_use]
    pub fn excluding_names(mut self, names: &HashSet<String>) -> Self {
        if !names.is_empty() {
            self.candidates
                .retain(|c| !names.contains(&c.name.to_lowercase()));
        }
        self
    }

    /// Remaining candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether nothing is left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the candidate id is still available
    #[must_use]
    pub fn contains(&self, exercise_id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == exercise_id)
    }

    /// Number of remaining candidates targeting `muscle`
    #[must_use]
    pub fn count_for(&self, muscle: &str) -> usize {
        self.candidates.iter().filter(|c| c.targets(muscle)).count()
    }

    /// Distinct lowercased muscle groups left, in pool order
    #[must_use]
    pub fn muscle_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for candidate in &self.candidates {
            let key = candidate.muscle_key();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Remove and return the first candidate targeting `muscle`
    pub fn take_for(&mut self, muscle: &str) -> Option<ExerciseCandidate> {
        let index = self.candidates.iter().position(|c| c.targets(muscle))?;
        Some(self.candidates.remove(index))
    }

    /// Remove and return the first candidate
    pub fn take_any(&mut self) -> Option<ExerciseCandidate> {
        if self.candidates.is_empty() {
            None
        } else {
            Some(self.candidates.remove(0))
        }
    }

    /// Take `count` candidates targeting `muscle`, or nothing at all
    pub fn take_many_for(&mut self, muscle: &str, count: usize) -> Option<Vec<ExerciseCandidate>> {
        if self.count_for(muscle) < count {
            return None;
        }
        (0..count).map(|_| self.take_for(muscle)).collect()
    }

    /// Take `count` candidates preferring `preferred` muscles, or nothing at all
    pub fn take_many_preferring(
        &mut self,
        preferred: &[String],
        count: usize,
    ) -> Option<Vec<ExerciseCandidate>> {
        if self.candidates.len() < count {
            return None;
        }

        let mut taken = Vec::with_capacity(count);
        for muscle in preferred {
            while taken.len() < count {
                match self.take_for(muscle) {
                    Some(candidate) => taken.push(candidate),
                    None => break,
                }
            }
        }
        while taken.len() < count {
            taken.push(self.take_any()?);
        }
        Some(taken)
    }
}

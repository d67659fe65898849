// ABOUTME: Candidate filter narrowing the caller's exercise pool to the requested muscle groups
// ABOUTME: Case-insensitive muscle matching with exclusion of caller-supplied ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use crate::models::ExerciseCandidate;

/// Keep candidates that target one of `muscle_groups` and are not excluded
///
/// An empty result is not an error; callers report "no suggestions".
#[must_use]
pub fn filter_candidates(
    pool: &[ExerciseCandidate],
    muscle_groups: &[String],
    exclude_ids: &[String],
) -> Vec<ExerciseCandidate> {
    let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();

    pool.iter()
        .filter(|candidate| muscle_groups.iter().any(|muscle| candidate.targets(muscle)))
        .filter(|candidate| !excluded.contains(candidate.id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<ExerciseCandidate> {
        vec![
            ExerciseCandidate::new("c1", "Supino reto", "Chest"),
            ExerciseCandidate::new("c2", "Crucifixo", "chest"),
            ExerciseCandidate::new("b1", "Remada curvada", "back"),
            ExerciseCandidate::new("l1", "Agachamento", "quadriceps"),
        ]
    }

    #[test]
    fn test_matches_muscle_case_insensitively() {
        let filtered = filter_candidates(&pool(), &["CHEST".to_owned()], &[]);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn test_matches_accented_upper_case_tag() {
        let pool = vec![ExerciseCandidate::new("g1", "Elevacao pelvica", "GLÚTEOS")];
        let filtered = filter_candidates(&pool, &["glúteos".to_owned()], &[]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "g1");
    }

    #[test]
    fn test_excludes_ids() {
        let filtered = filter_candidates(
            &pool(),
            &["chest".to_owned(), "back".to_owned()],
            &["c1".to_owned()],
        );
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "b1"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_candidates(&pool(), &["cardio".to_owned()], &[]).is_empty());
    }
}

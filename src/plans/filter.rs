// ABOUTME: Plan candidate filtering by available equipment and reported injuries
// ABOUTME: Untagged exercises count as bodyweight; injuries exclude the affected muscle groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{tags_match, EquipmentProfile, ExerciseCandidate};

/// Muscle groups to avoid for a reported injury
#[must_use]
pub fn injury_muscles(injury: &str) -> &'static [&'static str] {
    match injury.trim().to_lowercase().as_str() {
        "shoulder" => &["shoulders"],
        "knee" => &["quadriceps", "hamstrings"],
        "back" => &["back"],
        "wrist" => &["forearms"],
        _ => &[],
    }
}

fn equipment_allowed(candidate: &ExerciseCandidate, equipment: EquipmentProfile) -> bool {
    let Some(allowed) = equipment.allowed_equipment() else {
        return true;
    };
    candidate.equipment.is_empty()
        || candidate
            .equipment
            .iter()
            .any(|tag| allowed.iter().any(|a| tags_match(a, tag)))
}

/// Candidates usable with `equipment` and safe for `injuries`
#[must_use]
pub fn filter_for_plan(
    pool: &[ExerciseCandidate],
    equipment: EquipmentProfile,
    injuries: &[String],
) -> Vec<ExerciseCandidate> {
    let avoided: Vec<&str> = injuries
        .iter()
        .flat_map(|injury| injury_muscles(injury).iter().copied())
        .collect();

    pool.iter()
        .filter(|c| equipment_allowed(c, equipment))
        .filter(|c| !avoided.iter().any(|muscle| c.targets(muscle)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_basic_keeps_untagged_and_bands() {
        let pool = vec![
            ExerciseCandidate::new("1", "Flexao", "chest"),
            ExerciseCandidate::new("2", "Supino", "chest").with_equipment(["barbell", "bench"]),
            ExerciseCandidate::new("3", "Remada elastica", "back").with_equipment(["resistance_band"]),
        ];
        let ids: Vec<String> = filter_for_plan(&pool, EquipmentProfile::HomeBasic, &[])
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_knee_injury_drops_leg_muscles() {
        let pool = vec![
            ExerciseCandidate::new("1", "Agachamento", "quadriceps"),
            ExerciseCandidate::new("2", "Mesa flexora", "hamstrings"),
            ExerciseCandidate::new("3", "Elevacao pelvica", "glutes"),
        ];
        let kept = filter_for_plan(&pool, EquipmentProfile::FullGym, &["Knee".to_owned()]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "3");
    }
}

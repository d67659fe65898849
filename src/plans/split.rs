// ABOUTME: Weekly workout structures for each split type and plan muscle-name mapping
// ABOUTME: Labels, Portuguese workout names, and target muscles truncated to training days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{SplitType, WorkoutGoal};

/// One workout slot of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutSlot {
    /// Short label ("A")
    pub label: &'static str,
    /// Display name
    pub name: &'static str,
    /// Plan muscle names ("legs", "arms", ...)
    pub muscles: &'static [&'static str],
}

const fn slot(
    label: &'static str,
    name: &'static str,
    muscles: &'static [&'static str],
) -> WorkoutSlot {
    WorkoutSlot {
        label,
        name,
        muscles,
    }
}

const FULL_BODY_MUSCLES: &[&str] = &["chest", "back", "shoulders", "legs", "arms"];
const UPPER_MUSCLES: &[&str] = &["chest", "back", "shoulders", "arms"];
const LOWER_MUSCLES: &[&str] = &["legs", "glutes", "calves"];
const PUSH_MUSCLES: &[&str] = &["chest", "shoulders", "triceps"];
const PULL_MUSCLES: &[&str] = &["back", "biceps"];

const FULL_BODY: &[WorkoutSlot] = &[
    slot("A", "Treino Full Body A", FULL_BODY_MUSCLES),
    slot("B", "Treino Full Body B", FULL_BODY_MUSCLES),
];

const UPPER_LOWER: &[WorkoutSlot] = &[
    slot("A", "Treino Superior A", UPPER_MUSCLES),
    slot("B", "Treino Inferior A", LOWER_MUSCLES),
    slot("C", "Treino Superior B", UPPER_MUSCLES),
    slot("D", "Treino Inferior B", LOWER_MUSCLES),
];

const PUSH_PULL_LEGS: &[WorkoutSlot] = &[
    slot("A", "Treino Push (Empurrar)", PUSH_MUSCLES),
    slot("B", "Treino Pull (Puxar)", PULL_MUSCLES),
    slot("C", "Treino Legs (Pernas)", LOWER_MUSCLES),
    slot("D", "Treino Push B", PUSH_MUSCLES),
    slot("E", "Treino Pull B", PULL_MUSCLES),
    slot("F", "Treino Legs B", LOWER_MUSCLES),
];

const ABC: &[WorkoutSlot] = &[
    slot("A", "Treino Peito e Triceps", &["chest", "triceps"]),
    slot("B", "Treino Costas e Biceps", &["back", "biceps"]),
    slot("C", "Treino Pernas e Ombros", &["legs", "shoulders"]),
];

const ABCDE: &[WorkoutSlot] = &[
    slot("A", "Treino Peito", &["chest"]),
    slot("B", "Treino Costas", &["back"]),
    slot("C", "Treino Ombros", &["shoulders"]),
    slot("D", "Treino Pernas", &["legs", "glutes"]),
    slot("E", "Treino Bracos", &["biceps", "triceps"]),
];

/// Workout slots for a split, truncated to the training days
///
/// Splits without a dedicated structure use ABC.
#[must_use]
pub fn workout_structure(split: SplitType, days_per_week: u8) -> &'static [WorkoutSlot] {
    let slots = match split {
        SplitType::FullBody => FULL_BODY,
        SplitType::UpperLower => UPPER_LOWER,
        SplitType::PushPullLegs => PUSH_PULL_LEGS,
        SplitType::Abcde => ABCDE,
        SplitType::Abc | SplitType::Abcd | SplitType::Custom => ABC,
    };
    &slots[..slots.len().min(usize::from(days_per_week))]
}

/// Exercise muscle group for a plan muscle name
#[must_use]
pub fn plan_muscle(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "chest" => Some("chest"),
        "back" => Some("back"),
        "shoulders" => Some("shoulders"),
        "legs" | "quadriceps" => Some("quadriceps"),
        "glutes" => Some("glutes"),
        "calves" => Some("calves"),
        "arms" | "biceps" => Some("biceps"),
        "triceps" => Some("triceps"),
        "abs" => Some("abs"),
        "hamstrings" => Some("hamstrings"),
        "forearms" => Some("forearms"),
        _ => None,
    }
}

/// Portuguese goal label used in plan names
#[must_use]
pub const fn goal_label(goal: WorkoutGoal) -> &'static str {
    match goal {
        WorkoutGoal::Hypertrophy => "Hipertrofia",
        WorkoutGoal::Strength => "Forca",
        WorkoutGoal::FatLoss => "Emagrecimento",
        WorkoutGoal::Endurance => "Resistencia",
        WorkoutGoal::GeneralFitness => "Condicionamento",
        WorkoutGoal::Functional => "Funcional",
    }
}

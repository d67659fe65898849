// ABOUTME: Static constraint catalog for group techniques and the antagonist muscle table
// ABOUTME: Group size rules, muscle pairing modes, rest clamping, and per-technique guidance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages::{CLUSTER_INSTRUCTIONS, DROPSET_INSTRUCTIONS, REST_PAUSE_INSTRUCTIONS};
use crate::constants::techniques::{
    BISET_SIZE, GIANTSET_MAX, GIANTSET_MIN, GROUP_REST_MAX_SECS, GROUP_REST_MIN_SECS,
    SUPERSET_SIZE, TRISET_SIZE,
};
use crate::models::{tags_match, Technique};

/// Number of members a technique group must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSize {
    /// Exactly this many members
    Exact(usize),
    /// Any count within the inclusive range
    Range {
        /// Fewest members
        min: usize,
        /// Most members
        max: usize,
    },
}

impl GroupSize {
    /// Smallest acceptable size
    #[must_use]
    pub const fn min(&self) -> usize {
        match self {
            Self::Exact(n) => *n,
            Self::Range { min, .. } => *min,
        }
    }

    /// Largest acceptable size
    #[must_use]
    pub const fn max(&self) -> usize {
        match self {
            Self::Exact(n) => *n,
            Self::Range { max, .. } => *max,
        }
    }

    /// Whether `count` members satisfy the rule
    #[must_use]
    pub const fn accepts(&self, count: usize) -> bool {
        count >= self.min() && count <= self.max()
    }

    /// Whether the rule demands one exact size
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// How the muscle groups of a technique group must relate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusclePairing {
    /// Every member trains the same muscle group
    Same,
    /// Two members from a known antagonist pair
    Antagonist,
    /// No constraint
    Any,
}

/// Catalog entry for one group technique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechniqueRule {
    /// Technique this rule governs
    pub technique: Technique,
    /// Required member count
    pub size: GroupSize,
    /// Required muscle relationship
    pub pairing: MusclePairing,
}

impl TechniqueRule {
    /// Whether the member muscle groups satisfy the pairing mode
    #[must_use]
    pub fn pairing_satisfied<S: AsRef<str>>(&self, muscles: &[S]) -> bool {
        match self.pairing {
            MusclePairing::Any => true,
            MusclePairing::Same => muscles
                .windows(2)
                .all(|pair| tags_match(pair[0].as_ref(), pair[1].as_ref())),
            MusclePairing::Antagonist => {
                muscles.len() == 2 && are_antagonists(muscles[0].as_ref(), muscles[1].as_ref())
            }
        }
    }

    /// Whether a group with these member muscles is complete and valid
    #[must_use]
    pub fn is_satisfied_by<S: AsRef<str>>(&self, muscles: &[S]) -> bool {
        self.size.accepts(muscles.len()) && self.pairing_satisfied(muscles)
    }
}

/// Rules for every group technique
pub const CATALOG: [TechniqueRule; 4] = [
    TechniqueRule {
        technique: Technique::Biset,
        size: GroupSize::Exact(BISET_SIZE),
        pairing: MusclePairing::Same,
    },
    TechniqueRule {
        technique: Technique::Superset,
        size: GroupSize::Exact(SUPERSET_SIZE),
        pairing: MusclePairing::Antagonist,
    },
    TechniqueRule {
        technique: Technique::Triset,
        size: GroupSize::Exact(TRISET_SIZE),
        pairing: MusclePairing::Same,
    },
    TechniqueRule {
        technique: Technique::Giantset,
        size: GroupSize::Range {
            min: GIANTSET_MIN,
            max: GIANTSET_MAX,
        },
        pairing: MusclePairing::Any,
    },
];

/// Catalog rule for a technique, `None` for single-exercise techniques
#[must_use]
pub fn rule_for(technique: Technique) -> Option<&'static TechniqueRule> {
    CATALOG.iter().find(|rule| rule.technique == technique)
}

/// Known antagonist muscle pairs
pub const ANTAGONIST_PAIRS: [(&str, &str); 2] = [("chest", "back"), ("biceps", "triceps")];

/// Antagonist of a muscle group, if it belongs to a known pair
#[must_use]
pub fn antagonist_of(muscle: &str) -> Option<&'static str> {
    ANTAGONIST_PAIRS.iter().find_map(|(a, b)| {
        if tags_match(muscle, a) {
            Some(*b)
        } else if tags_match(muscle, b) {
            Some(*a)
        } else {
            None
        }
    })
}

/// Whether two muscle groups form a known antagonist pair
#[must_use]
pub fn are_antagonists(first: &str, second: &str) -> bool {
    antagonist_of(first).is_some_and(|other| tags_match(other, second))
}

/// Rest after the last member of a group
#[must_use]
pub fn clamp_group_rest(rest_seconds: u32) -> u32 {
    rest_seconds.clamp(GROUP_REST_MIN_SECS, GROUP_REST_MAX_SECS)
}

/// Standard execution guidance for single-exercise techniques
#[must_use]
pub const fn instructions_for(technique: Technique) -> Option<&'static str> {
    match technique {
        Technique::Dropset => Some(DROPSET_INSTRUCTIONS),
        Technique::RestPause => Some(REST_PAUSE_INSTRUCTIONS),
        Technique::Cluster => Some(CLUSTER_INSTRUCTIONS),
        _ => None,
    }
}

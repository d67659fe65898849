// ABOUTME: Advanced training technique enumeration and caller-supplied technique whitelists
// ABOUTME: Handles alias normalization, group/single classification, and whitelist queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Training technique applied to a suggested exercise
///
/// `Normal`, `Dropset`, `RestPause` and `Cluster` apply to a single exercise.
/// `Superset`, `Biset`, `Triset` and `Giantset` chain several exercises into a
/// group performed back-to-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    /// Plain straight sets
    #[default]
    Normal,
    /// Two exercises for antagonist muscle groups
    Superset,
    /// Two exercises for the same muscle group
    Biset,
    /// Three exercises for the same muscle group
    Triset,
    /// Four to eight exercises, any muscle group
    Giantset,
    /// Load reductions without rest
    Dropset,
    /// Short intra-set pauses to extend a set past failure
    RestPause,
    /// Fractioned sets with intra-set rest
    Cluster,
}

impl Technique {
    /// Every recognized technique
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::Superset,
        Self::Biset,
        Self::Triset,
        Self::Giantset,
        Self::Dropset,
        Self::RestPause,
        Self::Cluster,
    ];

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Superset => "superset",
            Self::Biset => "biset",
            Self::Triset => "triset",
            Self::Giantset => "giantset",
            Self::Dropset => "dropset",
            Self::RestPause => "rest_pause",
            Self::Cluster => "cluster",
        }
    }

    /// Whether this technique chains several exercises under one group id
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(
            self,
            Self::Superset | Self::Biset | Self::Triset | Self::Giantset
        )
    }

    /// Parse a technique name, accepting the legacy aliases
    ///
    /// Returns `None` for anything that is not a recognized technique.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "normal" | "isometric" => Some(Self::Normal),
            "superset" => Some(Self::Superset),
            "biset" | "bi_set" => Some(Self::Biset),
            "triset" | "tri_set" => Some(Self::Triset),
            "giantset" | "giant_set" => Some(Self::Giantset),
            "dropset" => Some(Self::Dropset),
            "rest_pause" => Some(Self::RestPause),
            "cluster" => Some(Self::Cluster),
            _ => None,
        }
    }

    /// Parse a technique name, collapsing anything unrecognized to `Normal`
    #[must_use]
    pub fn normalize(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    /// Display label used in generated reasons ("Biset", "Rest_pause", ...)
    #[must_use]
    pub fn capitalized(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, de-duplicated set of techniques a caller allows
///
/// Unrecognized names are dropped while parsing. An empty whitelist is
/// treated by the pipeline as "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TechniqueWhitelist {
    techniques: Vec<Technique>,
}

impl TechniqueWhitelist {
    /// Build a whitelist, keeping first-occurrence order
    #[must_use]
    pub fn new(techniques: impl IntoIterator<Item = Technique>) -> Self {
        let mut ordered: Vec<Technique> = Vec::new();
        for technique in techniques {
            if !ordered.contains(&technique) {
                ordered.push(technique);
            }
        }
        Self {
            techniques: ordered,
        }
    }

    /// Build a whitelist from technique names
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            names
                .into_iter()
                .filter_map(|name| Technique::parse(name.as_ref())),
        )
    }

    /// Whether the technique is allowed
    #[must_use]
    pub fn contains(&self, technique: Technique) -> bool {
        self.techniques.contains(&technique)
    }

    /// Whether plain sets are allowed
    #[must_use]
    pub fn permits_normal(&self) -> bool {
        self.contains(Technique::Normal)
    }

    /// Number of distinct techniques
    #[must_use]
    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    /// Whether no technique survived parsing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    /// Iterate in caller order
    pub fn iter(&self) -> impl Iterator<Item = Technique> + '_ {
        self.techniques.iter().copied()
    }

    /// Every entry is a group technique
    #[must_use]
    pub fn only_group_techniques(&self) -> bool {
        !self.is_empty() && self.techniques.iter().all(Technique::is_group)
    }

    /// Every entry is a single-exercise technique
    #[must_use]
    pub fn only_single_techniques(&self) -> bool {
        !self.is_empty() && self.techniques.iter().all(|t| !t.is_group())
    }

    /// Replacement for a technique the whitelist rejects
    ///
    /// Prefers the first whitelisted group technique, then the first entry.
    #[must_use]
    pub fn preferred_replacement(&self) -> Technique {
        self.techniques
            .iter()
            .copied()
            .find(Technique::is_group)
            .or_else(|| self.techniques.first().copied())
            .unwrap_or_default()
    }

    /// Resolve a technique against this whitelist
    #[must_use]
    pub fn enforce(&self, technique: Technique) -> Technique {
        if self.is_empty() || self.contains(technique) {
            technique
        } else {
            self.preferred_replacement()
        }
    }
}

impl From<Vec<String>> for TechniqueWhitelist {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<TechniqueWhitelist> for Vec<String> {
    fn from(whitelist: TechniqueWhitelist) -> Self {
        whitelist
            .techniques
            .iter()
            .map(|t| t.as_str().to_owned())
            .collect()
    }
}

/// Whether `technique` is allowed by an optional whitelist
#[must_use]
pub fn technique_permitted(whitelist: Option<&TechniqueWhitelist>, technique: Technique) -> bool {
    whitelist.map_or(true, |w| w.is_empty() || w.contains(technique))
}

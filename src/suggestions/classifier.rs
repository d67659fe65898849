// ABOUTME: Keyword classifier labelling exercise names as compound, isolation, or unknown
// ABOUTME: Portuguese and English movement keywords with accent folding for matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Movement category used to sequence a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MovementClass {
    /// Multi-joint movement
    Compound,
    /// No keyword matched
    Unknown,
    /// Single-joint movement
    Isolation,
}

impl MovementClass {
    /// Sort rank, compound first
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Compound => 0,
            Self::Unknown => 1,
            Self::Isolation => 2,
        }
    }
}

const COMPOUND_KEYWORDS: &[&str] = &[
    "supino",
    "bench press",
    "agachamento",
    "squat",
    "levantamento terra",
    "deadlift",
    "remada",
    "row",
    "barra fixa",
    "pull-up",
    "pull up",
    "pullup",
    "chin-up",
    "chin up",
    "puxada",
    "pulldown",
    "pull down",
    "desenvolvimento",
    "overhead press",
    "military press",
    "shoulder press",
    "leg press",
    "afundo",
    "lunge",
    "passada",
    "bulgaro",
    "stiff",
    "romanian",
    "paralela",
    "dip",
    "mergulho",
    "hip thrust",
    "elevacao pelvica",
    "flexao de braco",
    "push-up",
    "push up",
    "pushup",
    "clean",
    "snatch",
    "arranco",
    "thruster",
    "burpee",
];

const ISOLATION_KEYWORDS: &[&str] = &[
    "rosca",
    "curl",
    "crucifixo",
    "fly",
    "flye",
    "voador",
    "peck deck",
    "crossover",
    "cross over",
    "elevacao lateral",
    "lateral raise",
    "elevacao frontal",
    "front raise",
    "extensao",
    "extension",
    "triceps testa",
    "skull crusher",
    "pushdown",
    "triceps corda",
    "triceps pulley",
    "kickback",
    "coice",
    "cadeira extensora",
    "cadeira flexora",
    "mesa flexora",
    "cadeira abdutora",
    "cadeira adutora",
    "abducao",
    "aducao",
    "panturrilha",
    "calf",
    "pullover",
    "encolhimento",
    "shrug",
    "abdominal",
    "crunch",
    "prancha",
    "plank",
];

/// Replace Portuguese diacritics with their plain letters
fn fold_accents(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'ê' | 'è' | 'ë' => 'e',
            'í' | 'î' | 'ì' | 'ï' => 'i',
            'ó' | 'ô' | 'õ' | 'ò' | 'ö' => 'o',
            'ú' | 'û' | 'ù' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Whether `keyword` occurs at the start of a word in `name`
///
/// Suffixes are allowed so plurals match ("rows", "curls"), but a keyword
/// inside a longer word does not ("narrow").
fn starts_word(name: &str, keyword: &str) -> bool {
    name.match_indices(keyword).any(|(start, _)| {
        !matches!(name[..start].chars().next_back(), Some(c) if c.is_alphanumeric())
    })
}

/// Classify an exercise by name
///
/// Compound keywords are checked first, so a name matching both lists is
/// compound.
#[must_use]
pub fn classify(name: &str) -> MovementClass {
    let normalized = fold_accents(&name.to_lowercase());

    if COMPOUND_KEYWORDS.iter().any(|k| starts_word(&normalized, k)) {
        MovementClass::Compound
    } else if ISOLATION_KEYWORDS.iter().any(|k| starts_word(&normalized, k)) {
        MovementClass::Isolation
    } else {
        MovementClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_names() {
        assert_eq!(classify("Supino Reto com Barra"), MovementClass::Compound);
        assert_eq!(classify("Barbell Back Squat"), MovementClass::Compound);
        assert_eq!(classify("Levantamento Terra"), MovementClass::Compound);
        assert_eq!(classify("Remada Curvada"), MovementClass::Compound);
    }

    #[test]
    fn test_isolation_names_with_accents() {
        assert_eq!(classify("Elevação Lateral"), MovementClass::Isolation);
        assert_eq!(classify("Rosca Direta"), MovementClass::Isolation);
        assert_eq!(classify("Cable Fly"), MovementClass::Isolation);
        assert_eq!(classify("Extensão de Tríceps"), MovementClass::Isolation);
    }

    #[test]
    fn test_compound_wins_over_isolation() {
        // "leg press" and "extension" both appear
        assert_eq!(classify("Leg press with extension"), MovementClass::Compound);
    }

    #[test]
    fn test_keywords_match_at_word_start_only() {
        assert_eq!(classify("Narrow grip curl"), MovementClass::Isolation);
        assert_eq!(classify("Seated cable rows"), MovementClass::Compound);
        assert_eq!(classify("Walking lunges"), MovementClass::Compound);
        assert_eq!(classify("Conditioning drill"), MovementClass::Unknown);
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(classify("Mobilidade de quadril"), MovementClass::Unknown);
        assert_eq!(classify(""), MovementClass::Unknown);
        assert!(MovementClass::Compound.rank() < MovementClass::Unknown.rank());
        assert!(MovementClass::Unknown.rank() < MovementClass::Isolation.rank());
    }
}

// ABOUTME: Parsing and validation of LLM suggestion output into draft suggestion items
// ABOUTME: Code-fence stripping, lenient field decoding, id checks, and technique normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::{ExerciseCandidate, Prescription, SuggestionItem, Technique, TechniqueWhitelist};

use super::generator::GenerationError;

/// Strip an optional markdown code fence around a JSON body
#[must_use]
pub fn strip_code_fences(content: &str) -> &str {
    let inner = if let Some((_, rest)) = content.split_once("```json") {
        rest.split_once("```").map_or(rest, |(body, _)| body)
    } else if let Some((_, rest)) = content.split_once("```") {
        rest.split_once("```").map_or(rest, |(body, _)| body)
    } else {
        content
    };
    inner.trim()
}

/// One suggestion as the LLM wrote it
///
/// Only `exercise_id` is required. Numeric fields accept numbers or strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    exercise_id: Value,
    #[serde(default)]
    sets: Option<Value>,
    #[serde(default)]
    reps: Option<Value>,
    #[serde(default)]
    rest_seconds: Option<Value>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    technique_type: Option<String>,
    #[serde(default)]
    exercise_group_id: Option<Value>,
    #[serde(default)]
    exercise_group_order: Option<Value>,
    #[serde(default)]
    execution_instructions: Option<String>,
    #[serde(default)]
    isometric_seconds: Option<Value>,
}

/// Suggestion document returned by the LLM
#[derive(Debug, Clone, Deserialize)]
pub struct RawDraft {
    /// Suggested items
    pub suggestions: Vec<RawItem>,
    /// Optional tip
    #[serde(default)]
    pub message: Option<String>,
}

/// Parse the LLM content into a raw draft
///
/// # Errors
///
/// Returns [`GenerationError::EmptyResponse`] for blank content and
/// [`GenerationError::MalformedResponse`] when the JSON does not match.
pub fn parse_draft(content: &str) -> Result<RawDraft, GenerationError> {
    let body = strip_code_fences(content);
    if body.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}

/// What to do with a group technique that arrived without a group id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Keep the technique; the repair stage assigns a group
    Adopt,
    /// Fall back to `normal`
    Demote,
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_usize(value: &Value) -> Option<usize> {
    value_to_u32(value).and_then(|n| usize::try_from(n).ok())
}

impl RawItem {
    /// Referenced exercise id as a string
    #[must_use]
    pub fn exercise_id(&self) -> Option<String> {
        value_to_string(&self.exercise_id)
    }

    fn group_id(&self) -> Option<String> {
        self.exercise_group_id.as_ref().and_then(value_to_string)
    }

    fn technique(&self, whitelist: Option<&TechniqueWhitelist>) -> Technique {
        let technique = self
            .technique_type
            .as_deref()
            .map_or(Technique::Normal, Technique::normalize);
        whitelist.map_or(technique, |w| w.enforce(technique))
    }

    fn into_item(
        self,
        candidate: &ExerciseCandidate,
        whitelist: Option<&TechniqueWhitelist>,
        defaults: &Prescription,
        orphans: OrphanPolicy,
    ) -> SuggestionItem {
        let mut technique = self.technique(whitelist);
        let group_id = if technique.is_group() { self.group_id() } else { None };
        if technique.is_group() && group_id.is_none() && orphans == OrphanPolicy::Demote {
            technique = Technique::Normal;
        }

        let prescription = Prescription::new(
            self.sets.as_ref().and_then(value_to_u32).unwrap_or(defaults.sets),
            self.reps
                .as_ref()
                .and_then(value_to_string)
                .unwrap_or_else(|| defaults.reps.clone()),
            self.rest_seconds
                .as_ref()
                .and_then(value_to_u32)
                .unwrap_or(defaults.rest_seconds),
        );
        let reason = self
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("Exercicio para {}", candidate.muscle_group));

        let mut item = SuggestionItem::from_candidate(candidate, &prescription, reason)
            .with_technique(technique);
        if let Some(group_id) = group_id {
            let group_order = self
                .exercise_group_order
                .as_ref()
                .and_then(value_to_usize)
                .unwrap_or(0);
            item = item.in_group(&group_id, group_order);
        }
        item.execution_instructions = self.execution_instructions.filter(|s| !s.trim().is_empty());
        item.isometric_seconds = self
            .isometric_seconds
            .as_ref()
            .and_then(value_to_u32)
            .filter(|s| *s > 0);
        item
    }
}

/// Turn raw LLM items into draft suggestion items
///
/// Items referencing unknown or already-used ids are dropped. Name and muscle
/// group always come from the candidate pool.
#[must_use]
pub fn validate_items(
    raw: Vec<RawItem>,
    candidates: &[ExerciseCandidate],
    whitelist: Option<&TechniqueWhitelist>,
    defaults: &Prescription,
    orphans: OrphanPolicy,
) -> Vec<SuggestionItem> {
    let by_id: HashMap<&str, &ExerciseCandidate> =
        candidates.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let total = raw.len();

    let items: Vec<SuggestionItem> = raw
        .into_iter()
        .filter_map(|item| {
            let id = item.exercise_id()?;
            let candidate = by_id.get(id.as_str())?;
            if !seen.insert(id) {
                return None;
            }
            Some(item.into_item(candidate, whitelist, defaults, orphans))
        })
        .collect();

    debug!(
        received = total,
        accepted = items.len(),
        "Validated LLM suggestion items"
    );
    items
}

// ABOUTME: Orders the final suggestion list compound-first while keeping groups contiguous
// ABOUTME: Pure reordering that only rewrites order indices and is idempotent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::SuggestionItem;

use super::classifier::classify;

/// A group, or a single ungrouped exercise, moved as one block
struct Unit {
    rank: u8,
    position: usize,
    lead_order: usize,
    members: Vec<SuggestionItem>,
}

/// Sort the list compound-first, then unknown, then isolation
///
/// Each group is ranked by the name of its first member and stays contiguous.
/// Ties keep the incoming order.
#[must_use]
pub fn order_suggestions(items: Vec<SuggestionItem>) -> Vec<SuggestionItem> {
    let mut units: Vec<Unit> = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        let existing = item.group_id.as_deref().and_then(|id| {
            units
                .iter_mut()
                .find(|u| u.members[0].group_id.as_deref() == Some(id))
        });
        match existing {
            Some(unit) => {
                if item.group_order < unit.lead_order {
                    unit.lead_order = item.group_order;
                    unit.position = position;
                }
                unit.members.push(item);
            }
            None => units.push(Unit {
                rank: 0,
                position,
                lead_order: item.group_order,
                members: vec![item],
            }),
        }
    }

    for unit in &mut units {
        unit.members.sort_by_key(|m| m.group_order);
        unit.rank = classify(&unit.members[0].name).rank();
    }
    units.sort_by_key(|u| (u.rank, u.position));

    let mut ordered: Vec<SuggestionItem> = units.into_iter().flat_map(|u| u.members).collect();
    for (order, item) in ordered.iter_mut().enumerate() {
        item.order = order;
    }
    ordered
}

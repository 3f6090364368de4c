//! Near-duplicate collapsing for extracted action items.

use minuta_core::types::ActionItem;

use crate::normalize::normalize_for_compare;

/// Two tasks are near-duplicates when, after lower-casing and whitespace
/// normalization, either one contains the other.
///
/// Deliberately permissive: "review" matches "review architecture docs".
pub fn is_near_duplicate(a: &str, b: &str) -> bool {
    let a = normalize_for_compare(a);
    let b = normalize_for_compare(b);
    a.contains(&b) || b.contains(&a)
}

/// True when `task` is a near-duplicate of any item already in `items`.
pub fn contains_near_duplicate(items: &[ActionItem], task: &str) -> bool {
    items.iter().any(|item| is_near_duplicate(&item.task, task))
}

/// Drop near-duplicate items, keeping the first occurrence and the
/// original order.
pub fn dedupe(items: Vec<ActionItem>) -> Vec<ActionItem> {
    let mut kept: Vec<ActionItem> = Vec::with_capacity(items.len());
    for item in items {
        if !contains_near_duplicate(&kept, &item.task) {
            kept.push(item);
        }
    }
    kept
}

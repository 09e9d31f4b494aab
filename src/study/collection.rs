//! Collection membership lists: sanitation, reconciliation, reordering
//!
//! A collection is an ordered, deduplicated list of `"<type>:<id>"`
//! strings. Order is user-significant and must survive reconciliation
//! against the current universe of valid ids.

use serde::{Deserialize, Serialize};

/// Item-type domain of collection ids (the glossary uses its own prefix
/// here, distinct from the `term:` study keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionItemKind {
    Technique,
    Glossary,
    Exercise,
}

impl CollectionItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technique => "technique",
            Self::Glossary => "glossary",
            Self::Exercise => "exercise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    Backward,
    Forward,
}

pub fn collection_item_id(kind: CollectionItemKind, id: &str) -> String {
    format!("{}:{}", kind.as_str(), id)
}

/// Drop non-string, empty and whitespace-only entries, dedupe preserving
/// first-seen order
pub fn sanitize_collection_item_ids(raw: &serde_json::Value) -> Vec<String> {
    let Some(values) = raw.as_array() else {
        return Vec::new();
    };

    let mut seen = std::collections::HashSet::new();
    let mut sanitized = Vec::new();
    for value in values {
        let Some(id) = value.as_str() else { continue };
        let trimmed = id.trim();
        if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
            continue;
        }
        sanitized.push(trimmed.to_string());
    }
    sanitized
}

/// Reconcile a stored ordering against the current universe of valid ids
///
/// Stored entries survive, in stored order, only while still present;
/// present ids not yet included are appended in `append_order` if given,
/// else in `present` order. New library items thus join an existing
/// collection without scrambling the user's manual ordering.
pub fn normalize_collection_item_ids(
    stored: &[String],
    present: &[String],
    append_order: Option<&[String]>,
) -> Vec<String> {
    let present_set: std::collections::HashSet<&str> =
        present.iter().map(|s| s.as_str()).collect();
    let mut seen = std::collections::HashSet::new();
    let mut next = Vec::new();

    for id in stored {
        if !present_set.contains(id.as_str()) || !seen.insert(id.as_str()) {
            continue;
        }
        next.push(id.clone());
    }

    let append_source = append_order.unwrap_or(present);
    for id in append_source {
        if !present_set.contains(id.as_str()) || !seen.insert(id.as_str()) {
            continue;
        }
        next.push(id.clone());
    }

    next
}

/// Bounds-checked adjacent swap; any out-of-range request returns the
/// input unchanged
pub fn swap_collection_item_ids(
    ids: &[String],
    index: usize,
    direction: SwapDirection,
) -> Vec<String> {
    let target = match direction {
        SwapDirection::Backward => index.checked_sub(1),
        SwapDirection::Forward => index.checked_add(1),
    };

    let Some(target) = target else {
        return ids.to_vec();
    };
    if index >= ids.len() || target >= ids.len() {
        return ids.to_vec();
    }

    let mut next = ids.to_vec();
    next.swap(index, target);
    next
}

//! Bounded, deduplicated recency list
//!
//! At most one entry per `(kind, slug)` pair, sorted by `last_opened_at`
//! descending, capped at `MAX_RECENTS`. The same pipeline runs on read and
//! write, so a corrupted persisted list self-heals on the next read.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{ContentKind, EntryDirection};

pub const MAX_RECENTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentItem {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub slug: String,
    pub last_opened_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryDirection>,
}

/// Input for recording an "open" interaction; the timestamp is optional
/// and validated (non-positive values fall back to the caller's now)
#[derive(Debug, Clone)]
pub struct RecentInput {
    pub kind: ContentKind,
    pub slug: String,
    pub last_opened_at: Option<i64>,
    pub entry: Option<EntryDirection>,
}

pub fn valid_timestamp(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}

/// Parse one untrusted persisted entry; anything malformed yields `None`
fn normalize_entry(value: &serde_json::Value) -> Option<RecentItem> {
    let object = value.as_object()?;

    let kind = object
        .get("type")
        .and_then(|v| v.as_str())
        .and_then(ContentKind::from_wire)?;

    let slug = object.get("slug").and_then(|v| v.as_str())?.trim();
    if slug.is_empty() {
        return None;
    }

    let last_opened_at = object
        .get("lastOpenedAt")
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as i64)?;

    let entry = object
        .get("entry")
        .and_then(|v| v.as_str())
        .and_then(EntryDirection::from_wire);

    Some(RecentItem {
        kind,
        slug: slug.to_string(),
        last_opened_at,
        entry,
    })
}

/// Dedupe by `(kind, slug)` keeping the latest timestamp, sort by
/// `last_opened_at` descending (slug as the deterministic tie-break),
/// truncate to the cap
pub fn dedupe_and_sort(entries: Vec<RecentItem>) -> Vec<RecentItem> {
    let mut by_key: AHashMap<(ContentKind, String), RecentItem> = AHashMap::new();
    for entry in entries {
        let key = (entry.kind, entry.slug.clone());
        let keep_new = by_key
            .get(&key)
            .map_or(true, |existing| entry.last_opened_at > existing.last_opened_at);
        if keep_new {
            by_key.insert(key, entry);
        }
    }

    let mut deduped: Vec<RecentItem> = by_key.into_iter().map(|(_, entry)| entry).collect();
    deduped.sort_by(|a, b| {
        b.last_opened_at
            .cmp(&a.last_opened_at)
            .then_with(|| a.slug.cmp(&b.slug))
            .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
    });
    deduped.truncate(MAX_RECENTS);
    deduped
}

/// Rebuild the recents list from untrusted persisted data; corrupt input
/// of any shape degrades to an empty list
pub fn sanitize_recents(raw: &serde_json::Value) -> Vec<RecentItem> {
    let Some(values) = raw.as_array() else {
        return Vec::new();
    };
    dedupe_and_sort(values.iter().filter_map(normalize_entry).collect())
}

/// Upsert one item into the list, returning the new list
///
/// Returns the input unchanged when the slug is empty after trimming.
pub fn add_recent(current: Vec<RecentItem>, input: RecentInput, now: i64) -> Vec<RecentItem> {
    let slug = input.slug.trim().to_string();
    if slug.is_empty() {
        return current;
    }

    let last_opened_at = input
        .last_opened_at
        .and_then(valid_timestamp)
        .unwrap_or(now);

    let next = RecentItem {
        kind: input.kind,
        slug: slug.clone(),
        last_opened_at,
        entry: input.entry,
    };

    let mut entries: Vec<RecentItem> = current
        .into_iter()
        .filter(|e| !(e.kind == next.kind && e.slug == next.slug))
        .collect();
    entries.insert(0, next);
    dedupe_and_sort(entries)
}

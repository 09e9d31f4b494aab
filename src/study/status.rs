//! Tri-state per-variant study progress with technique-level aggregation
//!
//! Two storage granularities coexist. Legacy entries are keyed
//! `technique:<slug>`; current entries append the encoded variant key.
//! Reads for a single variant fall back to the legacy entry, but once any
//! variant-scoped entry exists for a technique the variant entries are the
//! sole source of truth for aggregation — a stale legacy value must not
//! resurrect a status the user has since cleared per variant.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::ContentKind;
use crate::technique::model::VariantKey;
use crate::technique::variant_key;

/// Virtual collection ids backed by study status rather than stored lists
pub const STUDY_PRACTICE_COLLECTION_ID: &str = "__study-practice__";
pub const STUDY_STABLE_COLLECTION_ID: &str = "__study-stable__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyStatus {
    #[default]
    None,
    Practice,
    Stable,
}

impl StudyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Practice => "practice",
            Self::Stable => "stable",
        }
    }

    pub fn from_wire(value: &str) -> Option<StudyStatus> {
        match value {
            "none" => Some(Self::None),
            "practice" => Some(Self::Practice),
            "stable" => Some(Self::Stable),
            _ => None,
        }
    }

    /// The only transition that exists: none → practice → stable → none
    pub fn cycle(self) -> StudyStatus {
        match self {
            Self::None => Self::Practice,
            Self::Practice => Self::Stable,
            Self::Stable => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStatusEntry {
    pub status: StudyStatus,
    pub updated_at: i64,
}

pub type StudyStatusMap = AHashMap<String, StudyStatusEntry>;

pub fn study_item_key(kind: ContentKind, slug: &str) -> String {
    format!("{}:{}", kind.as_str(), slug.trim())
}

pub fn technique_variant_study_key(slug: &str, variant: &VariantKey) -> String {
    format!(
        "{}:{}",
        study_item_key(ContentKind::Technique, slug),
        variant_key::encode(variant)
    )
}

pub fn status_for_item(map: &StudyStatusMap, kind: ContentKind, slug: &str) -> StudyStatus {
    map.get(&study_item_key(kind, slug))
        .map(|entry| entry.status)
        .unwrap_or_default()
}

/// Status for one exact variant, falling back to the legacy
/// whole-technique entry written before variant-level tracking existed
pub fn status_for_technique_variant(
    map: &StudyStatusMap,
    slug: &str,
    variant: &VariantKey,
) -> StudyStatus {
    if let Some(entry) = map.get(&technique_variant_study_key(slug, variant)) {
        return entry.status;
    }
    status_for_item(map, ContentKind::Technique, slug)
}

/// Non-none entries that count toward a technique's aggregate, with the
/// variant-entries-win precedence applied
fn technique_status_entries<'a>(
    map: &'a StudyStatusMap,
    slug: &str,
) -> Vec<(&'a String, &'a StudyStatusEntry)> {
    let item_key = study_item_key(ContentKind::Technique, slug);
    let prefix = format!("{item_key}:");

    let variant_entries: Vec<_> = map
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .collect();

    if !variant_entries.is_empty() {
        return variant_entries
            .into_iter()
            .filter(|(_, entry)| entry.status != StudyStatus::None)
            .collect();
    }

    map.get_key_value(&item_key)
        .filter(|(_, entry)| entry.status != StudyStatus::None)
        .into_iter()
        .collect()
}

/// Aggregate status for a technique: the most-recently-updated non-none
/// entry, `updated_at` descending, keys as the deterministic tie-break
pub fn aggregate_technique_status(map: &StudyStatusMap, slug: &str) -> StudyStatus {
    let mut entries = technique_status_entries(map, slug);
    if entries.is_empty() {
        return StudyStatus::None;
    }

    entries.sort_by(|(key_a, a), (key_b, b)| {
        b.updated_at.cmp(&a.updated_at).then_with(|| key_a.cmp(key_b))
    });
    entries[0].1.status
}

/// Variant-scoped entries for a technique with their decoded keys
///
/// Entries whose stored variant key no longer decodes (written by an
/// older app version against enum values that no longer exist) are
/// skipped, not surfaced as errors.
pub fn technique_variant_statuses(
    map: &StudyStatusMap,
    slug: &str,
) -> Vec<(VariantKey, StudyStatusEntry)> {
    let prefix = format!("{}:", study_item_key(ContentKind::Technique, slug));
    let mut entries: Vec<(VariantKey, StudyStatusEntry)> = map
        .iter()
        .filter_map(|(key, entry)| {
            let encoded = key.strip_prefix(&prefix)?;
            Some((variant_key::decode(encoded)?, *entry))
        })
        .collect();
    entries.sort_by(|(a, _), (b, _)| variant_key::encode(a).cmp(&variant_key::encode(b)));
    entries
}

pub fn has_technique_status(map: &StudyStatusMap, slug: &str, status: StudyStatus) -> bool {
    technique_status_entries(map, slug)
        .iter()
        .any(|(_, entry)| entry.status == status)
}

pub fn is_study_collection_id(collection_id: &str) -> bool {
    collection_id == STUDY_PRACTICE_COLLECTION_ID || collection_id == STUDY_STABLE_COLLECTION_ID
}

pub fn study_status_for_collection_id(collection_id: &str) -> Option<StudyStatus> {
    match collection_id {
        STUDY_PRACTICE_COLLECTION_ID => Some(StudyStatus::Practice),
        STUDY_STABLE_COLLECTION_ID => Some(StudyStatus::Stable),
        _ => None,
    }
}

fn has_known_prefix(key: &str) -> bool {
    ContentKind::ALL
        .iter()
        .any(|kind| key.starts_with(&format!("{}:", kind.as_str())))
}

/// Rebuild a status map from untrusted persisted data
///
/// Entries with unknown key prefixes, unknown status values or malformed
/// shapes are dropped. A missing or invalid `updatedAt` defaults to `now`
/// instead of discarding the entry. Never fails: corrupt input of any
/// shape degrades to an empty map.
pub fn sanitize_study_status_map(raw: &serde_json::Value, now: i64) -> StudyStatusMap {
    let mut sanitized = StudyStatusMap::default();
    let Some(object) = raw.as_object() else {
        return sanitized;
    };

    for (key, value) in object {
        if !has_known_prefix(key) {
            continue;
        }
        let Some(entry) = value.as_object() else {
            continue;
        };
        let Some(status) = entry
            .get("status")
            .and_then(|v| v.as_str())
            .and_then(StudyStatus::from_wire)
        else {
            continue;
        };
        let updated_at = entry
            .get("updatedAt")
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite())
            .map(|v| v as i64)
            .unwrap_or(now);

        sanitized.insert(key.clone(), StudyStatusEntry { status, updated_at });
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EntryDirection, Hanmi, WeaponKind};

    fn variant(direction: EntryDirection) -> VariantKey {
        VariantKey {
            hanmi: Hanmi::AiHanmi,
            direction,
            weapon: WeaponKind::Empty,
            version_id: None,
        }
    }

    fn entry(status: StudyStatus, updated_at: i64) -> StudyStatusEntry {
        StudyStatusEntry { status, updated_at }
    }

    #[test]
    fn test_cycle() {
        assert_eq!(StudyStatus::None.cycle(), StudyStatus::Practice);
        assert_eq!(StudyStatus::Practice.cycle(), StudyStatus::Stable);
        assert_eq!(StudyStatus::Stable.cycle(), StudyStatus::None);
    }

    #[test]
    fn test_item_key_trims_slug() {
        assert_eq!(study_item_key(ContentKind::Term, " kamae "), "term:kamae");
    }

    #[test]
    fn test_variant_read_falls_back_to_legacy_entry() {
        let mut map = StudyStatusMap::default();
        map.insert("technique:ikkyo".to_string(), entry(StudyStatus::Practice, 10));

        let status = status_for_technique_variant(&map, "ikkyo", &variant(EntryDirection::Irimi));
        assert_eq!(status, StudyStatus::Practice);
    }

    #[test]
    fn test_variant_entry_wins_over_legacy() {
        let mut map = StudyStatusMap::default();
        map.insert("technique:ikkyo".to_string(), entry(StudyStatus::Stable, 10));
        let key = technique_variant_study_key("ikkyo", &variant(EntryDirection::Irimi));
        map.insert(key, entry(StudyStatus::None, 20));

        let status = status_for_technique_variant(&map, "ikkyo", &variant(EntryDirection::Irimi));
        assert_eq!(status, StudyStatus::None);
    }

    #[test]
    fn test_aggregate_empty_map_is_none() {
        assert_eq!(
            aggregate_technique_status(&StudyStatusMap::default(), "ikkyo"),
            StudyStatus::None
        );
    }

    #[test]
    fn test_aggregate_uses_most_recent_entry() {
        let mut map = StudyStatusMap::default();
        map.insert(
            technique_variant_study_key("ikkyo", &variant(EntryDirection::Irimi)),
            entry(StudyStatus::Practice, 100),
        );
        map.insert(
            technique_variant_study_key("ikkyo", &variant(EntryDirection::Ura)),
            entry(StudyStatus::Stable, 200),
        );

        assert_eq!(aggregate_technique_status(&map, "ikkyo"), StudyStatus::Stable);
    }

    #[test]
    fn test_aggregate_ignores_legacy_once_variant_entries_exist() {
        let mut map = StudyStatusMap::default();
        map.insert("technique:ikkyo".to_string(), entry(StudyStatus::Stable, 999));
        map.insert(
            technique_variant_study_key("ikkyo", &variant(EntryDirection::Irimi)),
            entry(StudyStatus::None, 10),
        );

        // The only variant entry is none, so the stale legacy stable value
        // must not leak through.
        assert_eq!(aggregate_technique_status(&map, "ikkyo"), StudyStatus::None);
    }

    #[test]
    fn test_aggregate_falls_back_to_legacy_without_variant_entries() {
        let mut map = StudyStatusMap::default();
        map.insert("technique:ikkyo".to_string(), entry(StudyStatus::Practice, 10));
        assert_eq!(aggregate_technique_status(&map, "ikkyo"), StudyStatus::Practice);
    }

    #[test]
    fn test_has_technique_status() {
        let mut map = StudyStatusMap::default();
        map.insert(
            technique_variant_study_key("ikkyo", &variant(EntryDirection::Irimi)),
            entry(StudyStatus::Practice, 10),
        );
        assert!(has_technique_status(&map, "ikkyo", StudyStatus::Practice));
        assert!(!has_technique_status(&map, "ikkyo", StudyStatus::Stable));
    }

    #[test]
    fn test_variant_statuses_skip_undecodable_keys() {
        let mut map = StudyStatusMap::default();
        map.insert(
            technique_variant_study_key("ikkyo", &variant(EntryDirection::Irimi)),
            entry(StudyStatus::Practice, 10),
        );
        // Written by an older app version against a weapon that no longer
        // exists in the enum
        map.insert(
            "technique:ikkyo:ai-hanmi|irimi|katana|".to_string(),
            entry(StudyStatus::Stable, 20),
        );
        map.insert("technique:ikkyo".to_string(), entry(StudyStatus::Stable, 30));

        let statuses = technique_variant_statuses(&map, "ikkyo");
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].0.direction, EntryDirection::Irimi);
        assert_eq!(statuses[0].1.status, StudyStatus::Practice);
    }

    #[test]
    fn test_sanitize_keeps_well_formed_drops_malformed() {
        let raw = serde_json::json!({
            "technique:ikkyo": {"status": "practice", "updatedAt": 42},
            "technique:nikyo": {"status": "mastered", "updatedAt": 42},
            "mystery:sankyo": {"status": "practice", "updatedAt": 42},
            "term:kamae": "not an object"
        });
        let map = sanitize_study_status_map(&raw, 1000);
        assert_eq!(map.len(), 1);
        let entry = map.get("technique:ikkyo").unwrap();
        assert_eq!(entry.status, StudyStatus::Practice);
        assert_eq!(entry.updated_at, 42);
    }

    #[test]
    fn test_sanitize_defaults_invalid_updated_at_to_now() {
        let raw = serde_json::json!({
            "exercise:rowing": {"status": "stable", "updatedAt": "yesterday"}
        });
        let map = sanitize_study_status_map(&raw, 777);
        assert_eq!(map.get("exercise:rowing").unwrap().updated_at, 777);
    }

    #[test]
    fn test_sanitize_non_object_input_degrades_to_empty() {
        for raw in [
            serde_json::json!(null),
            serde_json::json!([1, 2, 3]),
            serde_json::json!("corrupt"),
        ] {
            assert!(sanitize_study_status_map(&raw, 0).is_empty());
        }
    }

    #[test]
    fn test_study_collection_ids() {
        assert!(is_study_collection_id(STUDY_PRACTICE_COLLECTION_ID));
        assert!(!is_study_collection_id("my-collection"));
        assert_eq!(
            study_status_for_collection_id(STUDY_STABLE_COLLECTION_ID),
            Some(StudyStatus::Stable)
        );
        assert_eq!(study_status_for_collection_id("other"), None);
    }
}

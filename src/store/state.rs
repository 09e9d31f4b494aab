//! Persistent user-state façade over a key-value store
//!
//! Every read treats the stored value as untrusted input and sanitizes it;
//! every write is fire-and-forget: a failing store operation is logged and
//! treated as having had no effect, never retried or surfaced to the user.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::core::types::ContentKind;
use crate::store::keys;
use crate::store::kv::KeyValueStore;
use crate::study::collection::{
    normalize_collection_item_ids, sanitize_collection_item_ids, swap_collection_item_ids,
    SwapDirection,
};
use crate::study::recents::{add_recent, sanitize_recents, RecentInput, RecentItem};
use crate::study::status::{
    aggregate_technique_status, sanitize_study_status_map, status_for_item,
    status_for_technique_variant, study_item_key, technique_variant_statuses,
    technique_variant_study_key, StudyStatus, StudyStatusEntry, StudyStatusMap,
};
use crate::technique::model::VariantKey;

pub struct StudyState<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StudyState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn read_json(&self, key: &str) -> Option<serde_json::Value> {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!("malformed value under {key}, ignoring: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("read of {key} failed, using default: {err}");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("could not serialize value for {key}: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(key, &raw) {
            tracing::warn!("write of {key} failed, state unchanged: {err}");
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::warn!("remove of {key} failed: {err}");
        }
    }

    // === Study status ===

    pub fn study_status_map(&self) -> StudyStatusMap {
        let Some(raw) = self.read_json(keys::STUDY_STATUS_KEY) else {
            return StudyStatusMap::default();
        };
        sanitize_study_status_map(&raw, Self::now_millis())
    }

    pub fn status_for_item(&self, kind: ContentKind, slug: &str) -> StudyStatus {
        status_for_item(&self.study_status_map(), kind, slug)
    }

    pub fn status_for_technique_variant(&self, slug: &str, variant: &VariantKey) -> StudyStatus {
        status_for_technique_variant(&self.study_status_map(), slug, variant)
    }

    pub fn aggregate_technique_status(&self, slug: &str) -> StudyStatus {
        aggregate_technique_status(&self.study_status_map(), slug)
    }

    /// Variant-scoped entries with decoded keys; entries whose stored key
    /// no longer decodes are skipped
    pub fn technique_variant_statuses(&self, slug: &str) -> Vec<(VariantKey, StudyStatusEntry)> {
        technique_variant_statuses(&self.study_status_map(), slug)
    }

    /// Cycle the status of a term/exercise or a whole-technique legacy
    /// entry, returning the new status
    pub fn cycle_item_status(&mut self, kind: ContentKind, slug: &str) -> StudyStatus {
        let mut map = self.study_status_map();
        let next = status_for_item(&map, kind, slug).cycle();
        map.insert(
            study_item_key(kind, slug),
            StudyStatusEntry {
                status: next,
                updated_at: Self::now_millis(),
            },
        );
        self.write_json(keys::STUDY_STATUS_KEY, &map);
        next
    }

    /// Cycle the status of one exact variant, returning the new status
    ///
    /// The current status is resolved with the legacy fallback, so the
    /// first toggle on a technique tracked pre-variants continues the
    /// cycle instead of restarting it.
    pub fn cycle_technique_variant_status(
        &mut self,
        slug: &str,
        variant: &VariantKey,
    ) -> StudyStatus {
        let mut map = self.study_status_map();
        let next = status_for_technique_variant(&map, slug, variant).cycle();
        map.insert(
            technique_variant_study_key(slug, variant),
            StudyStatusEntry {
                status: next,
                updated_at: Self::now_millis(),
            },
        );
        self.write_json(keys::STUDY_STATUS_KEY, &map);
        next
    }

    /// Bulk reset; individual entries are never deleted
    pub fn reset_study_status(&mut self) {
        self.remove(keys::STUDY_STATUS_KEY);
    }

    // === Recents ===

    pub fn recents(&self) -> Vec<RecentItem> {
        let Some(raw) = self.read_json(keys::RECENTS_KEY) else {
            return Vec::new();
        };
        sanitize_recents(&raw)
    }

    pub fn add_recent(&mut self, input: RecentInput) {
        if input.slug.trim().is_empty() {
            return;
        }
        let next = add_recent(self.recents(), input, Self::now_millis());
        self.write_json(keys::RECENTS_KEY, &next);
    }

    pub fn clear_recents(&mut self) {
        self.remove(keys::RECENTS_KEY);
    }

    // === Collections ===

    pub fn collection_items(&self, collection_id: &str) -> Vec<String> {
        let Some(raw) = self.read_json(&keys::collection_items_key(collection_id)) else {
            return Vec::new();
        };
        sanitize_collection_item_ids(&raw)
    }

    pub fn save_collection_items(&mut self, collection_id: &str, item_ids: &[String]) {
        let sanitized = sanitize_collection_item_ids(&serde_json::json!(item_ids));
        self.write_json(&keys::collection_items_key(collection_id), &sanitized);
    }

    /// Stored ordering reconciled against the current universe of ids;
    /// the result is not written back until the user reorders or saves
    pub fn normalized_collection_items(
        &self,
        collection_id: &str,
        present: &[String],
        append_order: Option<&[String]>,
    ) -> Vec<String> {
        normalize_collection_item_ids(&self.collection_items(collection_id), present, append_order)
    }

    /// Adjacent swap persisted immediately; out-of-range requests leave
    /// the stored list untouched
    pub fn swap_collection_items(
        &mut self,
        collection_id: &str,
        index: usize,
        direction: SwapDirection,
    ) -> Vec<String> {
        let current = self.collection_items(collection_id);
        let next = swap_collection_item_ids(&current, index, direction);
        if next != current {
            self.write_json(&keys::collection_items_key(collection_id), &next);
        }
        next
    }
}

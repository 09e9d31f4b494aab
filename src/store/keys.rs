//! Storage keys for the three independent persisted entries

pub const STUDY_STATUS_KEY: &str = "waza.study-status";
pub const RECENTS_KEY: &str = "waza.recents";
pub const COLLECTION_ITEMS_PREFIX: &str = "waza.collection-items.";

pub fn collection_items_key(collection_id: &str) -> String {
    format!("{COLLECTION_ITEMS_PREFIX}{collection_id}")
}

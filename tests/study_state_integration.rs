//! Integration tests for the study-state engine against real stores

use waza_core::core::types::{ContentKind, EntryDirection, Hanmi, WeaponKind};
use waza_core::store::keys;
use waza_core::store::kv::{FileStore, KeyValueStore, MemoryStore};
use waza_core::store::state::StudyState;
use waza_core::study::collection::SwapDirection;
use waza_core::study::recents::{RecentInput, MAX_RECENTS};
use waza_core::study::status::{
    sanitize_study_status_map, technique_variant_study_key, StudyStatus,
};
use waza_core::technique::model::VariantKey;

fn variant(direction: EntryDirection) -> VariantKey {
    VariantKey {
        hanmi: Hanmi::AiHanmi,
        direction,
        weapon: WeaponKind::Empty,
        version_id: None,
    }
}

fn recent(slug: &str, at: i64) -> RecentInput {
    RecentInput {
        kind: ContentKind::Technique,
        slug: slug.to_string(),
        last_opened_at: Some(at),
        entry: None,
    }
}

#[test]
fn test_status_cycle_full_loop() {
    let mut state = StudyState::new(MemoryStore::new());
    let v = variant(EntryDirection::Irimi);

    assert_eq!(state.status_for_technique_variant("ikkyo", &v), StudyStatus::None);
    assert_eq!(state.cycle_technique_variant_status("ikkyo", &v), StudyStatus::Practice);
    assert_eq!(state.cycle_technique_variant_status("ikkyo", &v), StudyStatus::Stable);
    assert_eq!(state.cycle_technique_variant_status("ikkyo", &v), StudyStatus::None);
}

#[test]
fn test_legacy_fallback_and_variant_precedence() {
    let mut store = MemoryStore::new();
    // Legacy whole-technique entry written by an older app version
    store
        .set(
            keys::STUDY_STATUS_KEY,
            r#"{"technique:ikkyo": {"status": "practice", "updatedAt": 100}}"#,
        )
        .unwrap();
    let mut state = StudyState::new(store);

    // Unseen variant reads through to the legacy entry
    let v = variant(EntryDirection::Irimi);
    assert_eq!(state.status_for_technique_variant("ikkyo", &v), StudyStatus::Practice);
    assert_eq!(state.aggregate_technique_status("ikkyo"), StudyStatus::Practice);

    // First variant-level toggle continues the cycle from the legacy value
    assert_eq!(state.cycle_technique_variant_status("ikkyo", &v), StudyStatus::Stable);

    // Cycling that variant down to none must not resurrect the legacy
    // practice entry in the aggregate
    state.cycle_technique_variant_status("ikkyo", &v);
    assert_eq!(state.status_for_technique_variant("ikkyo", &v), StudyStatus::None);
    assert_eq!(state.aggregate_technique_status("ikkyo"), StudyStatus::None);
}

#[test]
fn test_aggregate_prefers_most_recent_variant_entry() {
    let mut entries = serde_json::Map::new();
    entries.insert(
        technique_variant_study_key("ikkyo", &variant(EntryDirection::Irimi)),
        serde_json::json!({"status": "practice", "updatedAt": 100}),
    );
    entries.insert(
        technique_variant_study_key("ikkyo", &variant(EntryDirection::Ura)),
        serde_json::json!({"status": "stable", "updatedAt": 300}),
    );
    let blob = serde_json::Value::Object(entries);
    let map = sanitize_study_status_map(&blob, 0);

    let mut store = MemoryStore::new();
    store
        .set(keys::STUDY_STATUS_KEY, &serde_json::to_string(&blob).unwrap())
        .unwrap();
    let state = StudyState::new(store);

    assert_eq!(map.len(), 2);
    assert_eq!(state.aggregate_technique_status("ikkyo"), StudyStatus::Stable);
}

#[test]
fn test_terms_and_exercises_track_independently() {
    let mut state = StudyState::new(MemoryStore::new());
    state.cycle_item_status(ContentKind::Term, "kamae");
    state.cycle_item_status(ContentKind::Exercise, "rowing");
    state.cycle_item_status(ContentKind::Exercise, "rowing");

    assert_eq!(state.status_for_item(ContentKind::Term, "kamae"), StudyStatus::Practice);
    assert_eq!(state.status_for_item(ContentKind::Exercise, "rowing"), StudyStatus::Stable);
    assert_eq!(state.status_for_item(ContentKind::Term, "rowing"), StudyStatus::None);
}

#[test]
fn test_recents_upsert_cap_and_order() {
    let mut state = StudyState::new(MemoryStore::new());

    for i in 0..25 {
        state.add_recent(recent(&format!("tech-{i:02}"), 1000 + i));
    }
    // Re-open an early technique with a newer timestamp
    state.add_recent(recent("tech-03", 5000));

    let recents = state.recents();
    assert_eq!(recents.len(), MAX_RECENTS);
    assert_eq!(recents[0].slug, "tech-03");
    assert!(recents
        .windows(2)
        .all(|w| w[0].last_opened_at >= w[1].last_opened_at));
    assert_eq!(
        recents.iter().filter(|r| r.slug == "tech-03").count(),
        1
    );
}

#[test]
fn test_recents_self_heal_from_corrupt_blob() {
    let mut store = MemoryStore::new();
    store
        .set(
            keys::RECENTS_KEY,
            r#"[{"type":"technique","slug":"ok","lastOpenedAt":5}, {"bad":true}, 17]"#,
        )
        .unwrap();
    let state = StudyState::new(store);

    let recents = state.recents();
    assert_eq!(recents.len(), 1);
    assert_eq!(recents[0].slug, "ok");
}

#[test]
fn test_clear_recents() {
    let mut state = StudyState::new(MemoryStore::new());
    state.add_recent(recent("ikkyo", 10));
    state.clear_recents();
    assert!(state.recents().is_empty());
}

#[test]
fn test_collection_reconciliation_after_library_change() {
    let mut state = StudyState::new(MemoryStore::new());
    state.save_collection_items(
        "favorites",
        &["technique:x".to_string(), "technique:y".to_string()],
    );

    // x was removed from the library, z is new
    let present = vec!["technique:y".to_string(), "technique:z".to_string()];
    let normalized = state.normalized_collection_items("favorites", &present, None);
    assert_eq!(normalized, present);
}

#[test]
fn test_collection_swap_bounds() {
    let mut state = StudyState::new(MemoryStore::new());
    let items: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    state.save_collection_items("c", &items);

    assert_eq!(
        state.swap_collection_items("c", 0, SwapDirection::Backward),
        items
    );
    assert_eq!(
        state.swap_collection_items("c", 1, SwapDirection::Forward),
        vec!["a".to_string(), "c".to_string(), "b".to_string()]
    );
}

#[test]
fn test_file_store_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user-state.json");

    {
        let mut state = StudyState::new(FileStore::new(&path));
        state.cycle_technique_variant_status("ikkyo", &variant(EntryDirection::Irimi));
        state.add_recent(recent("ikkyo", 10));
    }

    let state = StudyState::new(FileStore::new(&path));
    assert_eq!(
        state.status_for_technique_variant("ikkyo", &variant(EntryDirection::Irimi)),
        StudyStatus::Practice
    );
    assert_eq!(state.recents().len(), 1);
}

#[test]
fn test_corrupt_file_store_degrades_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user-state.json");
    std::fs::write(&path, "not json at all").unwrap();

    let state = StudyState::new(FileStore::new(&path));
    assert!(state.study_status_map().is_empty());
    assert!(state.recents().is_empty());
}

//! Expands authored versions into addressable variants
//!
//! Pure derivation: the same technique always produces byte-identical
//! output, so re-running after a content hot-reload is a no-op. Directions
//! iterate in the canonical `EntryDirection::ALL` order.

use std::collections::HashSet;

use crate::core::types::{EntryDirection, Hanmi, WeaponKind};
use crate::technique::model::{Technique, Variant, VariantKey, VersionMeta};
use crate::technique::registry::generate_version_label;

/// Deduplicated version metadata in first-seen order
///
/// The standard version is excluded; it is reachable through the default
/// picker entry instead. Multiple versions may share an id (one per
/// hanmi), hence the dedupe.
pub fn extract_versions_meta(technique: &Technique) -> Vec<VersionMeta> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut meta = Vec::new();

    for version in &technique.versions {
        if version.is_standard() {
            continue;
        }
        if seen.insert(version.id.as_str()) {
            meta.push(VersionMeta {
                id: version.id.clone(),
                label: generate_version_label(version),
                dojo: version.dojo_id.clone(),
                trainer_id: version.trainer_id.clone(),
            });
        }
    }

    meta
}

/// One variant per (version, populated direction) pair
///
/// Weapon defaults to empty-hand; content does not currently author
/// weapon-specific step sets, but stored keys for the full weapon domain
/// still decode (see `variant_key`).
pub fn derive_variants(technique: &Technique) -> Vec<Variant> {
    let mut variants = Vec::new();

    for version in &technique.versions {
        for direction in version.steps_by_entry.directions() {
            let steps = match version.steps_by_entry.get(direction) {
                Some(steps) => steps.clone(),
                None => continue,
            };

            let media = version
                .media_by_entry
                .as_ref()
                .map(|m| m.get(direction))
                .filter(|m| !m.is_empty())
                .map(|m| m.to_vec())
                .unwrap_or_else(|| version.media.clone());

            variants.push(Variant {
                key: VariantKey {
                    hanmi: version.hanmi,
                    direction,
                    weapon: WeaponKind::Empty,
                    version_id: if version.is_standard() {
                        None
                    } else {
                        Some(version.id.clone())
                    },
                },
                steps,
                uke: Some(version.uke.clone()),
                key_points: version.key_points.clone(),
                common_mistakes: Some(version.common_mistakes.clone()),
                context: version.context.clone(),
                media,
            });
        }
    }

    variants
}

/// Fills the derived fields from the authored versions
pub fn enrich_technique(mut technique: Technique) -> Technique {
    technique.versions_meta = extract_versions_meta(&technique);
    technique.variants = derive_variants(&technique);
    technique
}

/// Distinct directions present across a technique's variants, falling back
/// to the first version's populated directions, then to `irimi`
pub fn available_directions(technique: &Technique) -> Vec<EntryDirection> {
    if !technique.variants.is_empty() {
        return EntryDirection::ALL
            .iter()
            .copied()
            .filter(|d| technique.variants.iter().any(|v| v.key.direction == *d))
            .collect();
    }

    if let Some(first) = technique.versions.first() {
        let dirs: Vec<_> = first.steps_by_entry.directions().collect();
        if !dirs.is_empty() {
            return dirs;
        }
    }

    vec![EntryDirection::Irimi]
}

/// Distinct hanmis present across a technique's variants; `ai-hanmi` when
/// no variants exist yet
pub fn available_hanmis(technique: &Technique) -> Vec<Hanmi> {
    if technique.variants.is_empty() {
        return vec![Hanmi::AiHanmi];
    }

    Hanmi::ALL
        .iter()
        .copied()
        .filter(|h| technique.variants.iter().any(|v| v.key.hanmi == *h))
        .collect()
}

/// Distinct weapons present across a technique's variants; empty-hand when
/// no variants exist yet
pub fn available_weapons(technique: &Technique) -> Vec<WeaponKind> {
    if technique.variants.is_empty() {
        return vec![WeaponKind::Empty];
    }

    WeaponKind::ALL
        .iter()
        .copied()
        .filter(|w| technique.variants.iter().any(|v| v.key.weapon == *w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Grade, Localized};
    use crate::technique::model::{
        LocalizedSteps, StepsByEntry, Uke, Version, STANDARD_VERSION_ID,
    };

    fn steps(text: &str) -> LocalizedSteps {
        Localized::new(vec![text.to_string()], vec![text.to_string()])
    }

    fn version(id: &str, hanmi: Hanmi, directions: &[EntryDirection]) -> Version {
        let mut by_entry = StepsByEntry::default();
        for d in directions {
            by_entry.set(*d, steps(d.as_str()));
        }
        Version {
            id: id.to_string(),
            trainer_id: None,
            dojo_id: None,
            label: Some(format!("label-{id}")),
            hanmi,
            steps_by_entry: by_entry,
            steps: None,
            steps_irimi: None,
            steps_omote: None,
            steps_tenkan: None,
            steps_ura: None,
            uke: Uke {
                role: Localized::new("uke".to_string(), "uke".to_string()),
                notes: Localized::new(vec!["n".to_string()], vec!["n".to_string()]),
            },
            key_points: None,
            common_mistakes: Localized::new(Vec::new(), Vec::new()),
            context: None,
            media: Vec::new(),
            media_by_entry: None,
        }
    }

    fn technique(versions: Vec<Version>) -> Technique {
        Technique {
            id: "t1".to_string(),
            slug: "ikkyo".to_string(),
            name: Localized::new("Ikkyo".to_string(), "Ikkyo".to_string()),
            jp: None,
            category: "osae-waza".to_string(),
            attack: None,
            weapon: None,
            level: Grade::Kyu5,
            aliases: Vec::new(),
            summary: Localized::new("s".to_string(), "s".to_string()),
            tags: Vec::new(),
            versions,
            versions_meta: Vec::new(),
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_standard_version_excluded_from_meta() {
        let t = technique(vec![
            version(STANDARD_VERSION_ID, Hanmi::AiHanmi, &[EntryDirection::Irimi]),
            version("haase-bsv", Hanmi::AiHanmi, &[EntryDirection::Irimi]),
        ]);
        let meta = extract_versions_meta(&t);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].id, "haase-bsv");
    }

    #[test]
    fn test_meta_dedupes_by_id_first_seen() {
        let t = technique(vec![
            version("haase-bsv", Hanmi::AiHanmi, &[EntryDirection::Irimi]),
            version("haase-bsv", Hanmi::GyakuHanmi, &[EntryDirection::Irimi]),
        ]);
        let meta = extract_versions_meta(&t);
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_variants_one_per_populated_direction() {
        let t = technique(vec![version(
            STANDARD_VERSION_ID,
            Hanmi::AiHanmi,
            &[EntryDirection::Irimi, EntryDirection::Ura],
        )]);
        let variants = derive_variants(&t);
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| v.key.version_id.is_none()));
        assert!(variants.iter().all(|v| v.key.weapon == WeaponKind::Empty));
    }

    #[test]
    fn test_named_version_id_carried_into_key() {
        let t = technique(vec![version("haase-bsv", Hanmi::GyakuHanmi, &[EntryDirection::Omote])]);
        let variants = derive_variants(&t);
        assert_eq!(variants[0].key.version_id.as_deref(), Some("haase-bsv"));
        assert_eq!(variants[0].key.hanmi, Hanmi::GyakuHanmi);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let t = technique(vec![
            version(STANDARD_VERSION_ID, Hanmi::AiHanmi, &[EntryDirection::Ura, EntryDirection::Irimi]),
            version("haase-bsv", Hanmi::GyakuHanmi, &[EntryDirection::Tenkan]),
        ]);
        let a = derive_variants(&t);
        let b = derive_variants(&t);
        assert_eq!(a, b);

        let enriched = enrich_technique(t);
        let re_enriched = enrich_technique(enriched.clone());
        assert_eq!(enriched, re_enriched);
    }

    #[test]
    fn test_availability_fallbacks() {
        let empty = technique(Vec::new());
        assert_eq!(available_directions(&empty), vec![EntryDirection::Irimi]);
        assert_eq!(available_hanmis(&empty), vec![Hanmi::AiHanmi]);
        assert_eq!(available_weapons(&empty), vec![WeaponKind::Empty]);
    }

    #[test]
    fn test_availability_from_variants() {
        let t = enrich_technique(technique(vec![
            version(STANDARD_VERSION_ID, Hanmi::AiHanmi, &[EntryDirection::Ura]),
            version("haase-bsv", Hanmi::GyakuHanmi, &[EntryDirection::Irimi]),
        ]));
        assert_eq!(
            available_directions(&t),
            vec![EntryDirection::Irimi, EntryDirection::Ura]
        );
        assert_eq!(available_hanmis(&t), vec![Hanmi::AiHanmi, Hanmi::GyakuHanmi]);
        assert_eq!(available_weapons(&t), vec![WeaponKind::Empty]);
    }
}

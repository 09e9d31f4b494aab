//! Upgrades legacy step shapes into the current `steps_by_entry` form
//!
//! Two legacy shapes exist: per-direction fields (`stepsIrimi`,
//! `stepsOmote`, `stepsTenkan`, `stepsUra`) and a single undifferentiated
//! `steps` list. The per-direction fields win when present; a bare `steps`
//! list is assigned to the `ura` direction. That `ura` default is an
//! inherited content-authoring rule and must be kept as-is for
//! compatibility with existing data.
//!
//! Migration is idempotent: a version that already exposes populated
//! `steps_by_entry` passes through unchanged (unknown direction keys were
//! already dropped at parse time).

use crate::core::types::EntryDirection;
use crate::technique::model::{Technique, Version};

pub fn migrate_version(mut version: Version) -> Version {
    if !version.steps_by_entry.is_empty() {
        return version;
    }

    let legacy = [
        (EntryDirection::Irimi, version.steps_irimi.clone()),
        (EntryDirection::Omote, version.steps_omote.clone()),
        (EntryDirection::Tenkan, version.steps_tenkan.clone()),
        (EntryDirection::Ura, version.steps_ura.clone()),
    ];

    let mut migrated_any = false;
    for (direction, steps) in legacy {
        if let Some(steps) = steps {
            version.steps_by_entry.set(direction, steps);
            migrated_any = true;
        }
    }

    if !migrated_any {
        if let Some(steps) = version.steps.clone() {
            version.steps_by_entry.set(EntryDirection::Ura, steps);
        }
    }

    version
}

pub fn migrate_technique(mut technique: Technique) -> Technique {
    if !technique_needs_migration(&technique) {
        return technique;
    }

    technique.versions = technique
        .versions
        .into_iter()
        .map(migrate_version)
        .collect();
    technique
}

/// Reports whether a version still carries only legacy step shapes
pub fn version_needs_migration(version: &Version) -> bool {
    version.steps_by_entry.is_empty()
        && (version.steps.is_some()
            || version.steps_irimi.is_some()
            || version.steps_omote.is_some()
            || version.steps_tenkan.is_some()
            || version.steps_ura.is_some())
}

pub fn technique_needs_migration(technique: &Technique) -> bool {
    technique.versions.iter().any(version_needs_migration)
}

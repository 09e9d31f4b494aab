//! Content file loading pipeline
//!
//! Per file: parse JSON, validate against the expected slug (taken from
//! the file stem), migrate legacy step shapes, normalize text, then derive
//! variant data. Directory loading never stops at the first bad file —
//! every failure is collected so content authors can fix a whole batch in
//! one pass.

use std::path::{Path, PathBuf};

use crate::content::schema::RawTechnique;
use crate::content::validate::validate;
use crate::core::error::{Result, WazaError};
use crate::core::types::{EntryDirection, Localized, MediaItem};
use crate::technique::derive::enrich_technique;
use crate::technique::migrate::migrate_technique;
use crate::technique::model::{LocalizedSteps, StepsByEntry, Technique, Uke, Version};

/// A file that failed to load, with the reason
#[derive(Debug)]
pub struct ContentFailure {
    pub path: PathBuf,
    pub error: WazaError,
}

/// Result of loading a content directory
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub techniques: Vec<Technique>,
    pub failures: Vec<ContentFailure>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn load_technique_file(path: &Path) -> Result<Technique> {
    let raw_text = std::fs::read_to_string(path)?;
    let raw: RawTechnique = serde_json::from_str(&raw_text)?;

    let expected_slug = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    let technique = validate(&raw, expected_slug).map_err(|issues| WazaError::Validation {
        slug: expected_slug.to_string(),
        issues,
    })?;
    let technique = migrate_technique(technique);
    let technique = normalize_technique(technique);
    Ok(enrich_technique(technique))
}

/// Load every `.json` file in a directory, collecting all failures
pub fn load_techniques_dir(dir: &Path) -> Result<LoadOutcome> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            files.push(path);
        }
    }
    files.sort();

    let mut outcome = LoadOutcome::default();
    for path in files {
        match load_technique_file(&path) {
            Ok(technique) => outcome.techniques.push(technique),
            Err(error) => {
                tracing::warn!("failed to load {}: {}", path.display(), error);
                outcome.failures.push(ContentFailure { path, error });
            }
        }
    }

    outcome
        .techniques
        .sort_by_key(|t| t.name.en.to_lowercase());
    Ok(outcome)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_localized_string(value: Localized<String>) -> Localized<String> {
    Localized::new(value.en.trim().to_string(), value.de.trim().to_string())
}

/// Trims each row and drops rows that are empty in both locales, keeping
/// the two arrays index-aligned
fn normalize_localized_array(value: LocalizedSteps) -> LocalizedSteps {
    let rows = value.en.len().max(value.de.len());
    let mut en = Vec::new();
    let mut de = Vec::new();

    for i in 0..rows {
        let row_en = value.en.get(i).map(|s| s.trim()).unwrap_or_default();
        let row_de = value.de.get(i).map(|s| s.trim()).unwrap_or_default();
        if row_en.is_empty() && row_de.is_empty() {
            continue;
        }
        en.push(row_en.to_string());
        de.push(row_de.to_string());
    }

    Localized::new(en, de)
}

fn normalize_media(items: Vec<MediaItem>) -> Vec<MediaItem> {
    items
        .into_iter()
        .map(|item| MediaItem {
            media_type: item.media_type,
            url: item.url.trim().to_string(),
            title: normalize_optional(item.title),
        })
        .collect()
}

fn normalize_version(version: Version) -> Version {
    let mut steps_by_entry = StepsByEntry::default();
    for direction in EntryDirection::ALL {
        if let Some(steps) = version.steps_by_entry.get(direction) {
            steps_by_entry.set(direction, normalize_localized_array(steps.clone()));
        }
    }

    Version {
        id: version.id,
        trainer_id: normalize_optional(version.trainer_id),
        dojo_id: normalize_optional(version.dojo_id),
        label: normalize_optional(version.label),
        hanmi: version.hanmi,
        steps_by_entry,
        steps: version.steps,
        steps_irimi: version.steps_irimi,
        steps_omote: version.steps_omote,
        steps_tenkan: version.steps_tenkan,
        steps_ura: version.steps_ura,
        uke: Uke {
            role: normalize_localized_string(version.uke.role),
            notes: normalize_localized_array(version.uke.notes),
        },
        key_points: version.key_points.map(normalize_localized_array),
        common_mistakes: normalize_localized_array(version.common_mistakes),
        context: version.context.map(normalize_localized_string),
        media: normalize_media(version.media),
        media_by_entry: version.media_by_entry,
    }
}

fn normalize_technique(technique: Technique) -> Technique {
    Technique {
        id: technique.id,
        slug: technique.slug,
        name: normalize_localized_string(technique.name),
        jp: normalize_optional(technique.jp),
        category: technique.category,
        attack: normalize_optional(technique.attack),
        weapon: normalize_optional(technique.weapon),
        level: technique.level,
        aliases: technique
            .aliases
            .into_iter()
            .filter_map(|a| normalize_optional(Some(a)))
            .collect(),
        summary: normalize_localized_string(technique.summary),
        tags: technique
            .tags
            .into_iter()
            .filter_map(|t| normalize_optional(Some(t)))
            .collect(),
        versions: technique
            .versions
            .into_iter()
            .map(normalize_version)
            .collect(),
        versions_meta: technique.versions_meta,
        variants: technique.variants,
    }
}

//! Technique, version and variant records
//!
//! A `Technique` is constructed once per content file at load time and is
//! immutable afterwards. `versions` is the authored source material;
//! `versions_meta` and `variants` are derived by `technique::derive` and
//! never authored directly.

use serde::{Deserialize, Serialize};

use crate::core::types::{
    EntryDirection, Grade, Hanmi, Localized, MediaItem, WeaponKind,
};

/// Sentinel version id marking the standard/default version
///
/// Standard versions are excluded from user-facing version pickers and
/// their variants carry `version_id: None`.
pub const STANDARD_VERSION_ID: &str = "v-standard";

/// Step text in every supported locale; the two arrays are index-aligned
pub type LocalizedSteps = Localized<Vec<String>>;

/// Step text grouped by entry direction
///
/// Only the four known directions exist; unknown keys in older content are
/// dropped at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepsByEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irimi: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omote: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenkan: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ura: Option<LocalizedSteps>,
}

impl StepsByEntry {
    pub fn get(&self, direction: EntryDirection) -> Option<&LocalizedSteps> {
        match direction {
            EntryDirection::Irimi => self.irimi.as_ref(),
            EntryDirection::Omote => self.omote.as_ref(),
            EntryDirection::Tenkan => self.tenkan.as_ref(),
            EntryDirection::Ura => self.ura.as_ref(),
        }
    }

    pub fn set(&mut self, direction: EntryDirection, steps: LocalizedSteps) {
        match direction {
            EntryDirection::Irimi => self.irimi = Some(steps),
            EntryDirection::Omote => self.omote = Some(steps),
            EntryDirection::Tenkan => self.tenkan = Some(steps),
            EntryDirection::Ura => self.ura = Some(steps),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directions().next().is_none()
    }

    /// Populated directions in the canonical order
    pub fn directions(&self) -> impl Iterator<Item = EntryDirection> + '_ {
        EntryDirection::ALL
            .iter()
            .copied()
            .filter(|d| self.get(*d).is_some())
    }
}

/// Uke-role description for a version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uke {
    pub role: Localized<String>,
    pub notes: LocalizedSteps,
}

/// Per-direction media attachments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaByEntry {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub irimi: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omote: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tenkan: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ura: Vec<MediaItem>,
}

impl MediaByEntry {
    pub fn get(&self, direction: EntryDirection) -> &[MediaItem] {
        match direction {
            EntryDirection::Irimi => &self.irimi,
            EntryDirection::Omote => &self.omote,
            EntryDirection::Tenkan => &self.tenkan,
            EntryDirection::Ura => &self.ura,
        }
    }
}

/// One authored teaching variant source
///
/// The `steps`/`steps_*` fields are legacy step shapes accepted on input;
/// `technique::migrate` folds them into `steps_by_entry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dojo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub hanmi: Hanmi,
    #[serde(default)]
    pub steps_by_entry: StepsByEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_irimi: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_omote: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_tenkan: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_ura: Option<LocalizedSteps>,
    pub uke: Uke,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<LocalizedSteps>,
    pub common_mistakes: LocalizedSteps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_by_entry: Option<MediaByEntry>,
}

impl Version {
    pub fn is_standard(&self) -> bool {
        self.id == STANDARD_VERSION_ID
    }
}

/// Compound identity of the unit a learner actually studies
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantKey {
    pub hanmi: Hanmi,
    pub direction: EntryDirection,
    pub weapon: WeaponKind,
    /// `None` means the standard/default version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Derived content for one fully-specified variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub key: VariantKey,
    pub steps: LocalizedSteps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uke: Option<Uke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_mistakes: Option<LocalizedSteps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Localized<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
}

/// Display-ready version metadata, deduplicated by version id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMeta {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dojo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<String>,
}

/// A lesson entity, one per content file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    pub id: String,
    pub slug: String,
    pub name: Localized<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jp: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
    pub level: Grade,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub summary: Localized<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub versions: Vec<Version>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions_meta: Vec<VersionMeta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

//! Reference registry of trainers and dojos used for version labels

use crate::technique::model::Version;

/// Label used for versions that have no explicit label and no resolvable
/// trainer attribution
pub const DEFAULT_VERSION_LABEL: &str = "Standard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trainer {
    pub id: &'static str,
    pub name: &'static str,
    pub dojo_id: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dojo {
    pub id: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

const TRAINERS: &[Trainer] = &[Trainer {
    id: "alfred-haase",
    name: "Alfred Haase",
    dojo_id: "bsv",
}];

const DOJOS: &[Dojo] = &[Dojo {
    id: "bsv",
    name: "BSV",
    city: "Hamburg",
    country: "DE",
}];

pub fn trainer_by_id(id: &str) -> Option<&'static Trainer> {
    TRAINERS.iter().find(|t| t.id == id)
}

pub fn dojo_by_id(id: &str) -> Option<&'static Dojo> {
    DOJOS.iter().find(|d| d.id == id)
}

/// Display label for a version, in priority order: explicit label,
/// "Trainer (Dojo)", trainer name alone, then the fixed default.
pub fn generate_version_label(version: &Version) -> String {
    if let Some(label) = &version.label {
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            return label.clone();
        }
    }

    if let (Some(trainer_id), Some(dojo_id)) = (&version.trainer_id, &version.dojo_id) {
        if let (Some(trainer), Some(dojo)) = (trainer_by_id(trainer_id), dojo_by_id(dojo_id)) {
            return format!("{} ({})", trainer.name, dojo.name);
        }
    }

    if let Some(trainer_id) = &version.trainer_id {
        if let Some(trainer) = trainer_by_id(trainer_id) {
            return trainer.name.to_string();
        }
    }

    DEFAULT_VERSION_LABEL.to_string()
}

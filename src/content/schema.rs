//! Raw content shapes for JSON deserialization
//!
//! These structs deserialize leniently (everything optional, unknown keys
//! ignored) so that `content::validate` — not serde — decides what is
//! wrong with a file and can report every issue at once.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLocalizedString {
    pub en: Option<String>,
    pub de: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLocalizedArray {
    pub en: Option<Vec<String>>,
    pub de: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMediaItem {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Per-direction media attachments nested under `stepsByEntry.media`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEntryMedia {
    pub irimi: Option<Vec<RawMediaItem>>,
    pub omote: Option<Vec<RawMediaItem>>,
    pub tenkan: Option<Vec<RawMediaItem>>,
    pub ura: Option<Vec<RawMediaItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStepsByEntry {
    pub irimi: Option<RawLocalizedArray>,
    pub omote: Option<RawLocalizedArray>,
    pub tenkan: Option<RawLocalizedArray>,
    pub ura: Option<RawLocalizedArray>,
    pub media: Option<RawEntryMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawUke {
    pub role: Option<RawLocalizedString>,
    pub notes: Option<RawLocalizedArray>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawVersion {
    pub id: Option<String>,
    pub trainer_id: Option<String>,
    pub dojo_id: Option<String>,
    pub label: Option<String>,
    pub hanmi: Option<String>,
    pub steps_by_entry: Option<RawStepsByEntry>,
    /// Legacy single undifferentiated step list
    pub steps: Option<RawLocalizedArray>,
    /// Legacy per-direction step fields
    pub steps_irimi: Option<RawLocalizedArray>,
    pub steps_omote: Option<RawLocalizedArray>,
    pub steps_tenkan: Option<RawLocalizedArray>,
    pub steps_ura: Option<RawLocalizedArray>,
    pub uke: Option<RawUke>,
    pub key_points: Option<RawLocalizedArray>,
    pub common_mistakes: Option<RawLocalizedArray>,
    pub context: Option<RawLocalizedString>,
    pub media: Option<Vec<RawMediaItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTechnique {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<RawLocalizedString>,
    pub jp: Option<String>,
    pub category: Option<String>,
    pub attack: Option<String>,
    pub weapon: Option<String>,
    pub level: Option<String>,
    pub aliases: Option<Vec<String>>,
    pub summary: Option<RawLocalizedString>,
    pub tags: Option<Vec<String>>,
    pub versions: Option<Vec<RawVersion>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_technique_tolerates_sparse_input() {
        let raw: RawTechnique = serde_json::from_str("{}").unwrap();
        assert!(raw.id.is_none());
        assert!(raw.versions.is_none());
    }

    #[test]
    fn test_raw_version_accepts_legacy_fields() {
        let raw: RawVersion = serde_json::from_str(
            r#"{"id":"v1","stepsIrimi":{"en":["a"],"de":["b"]},"steps":{"en":["c"],"de":["d"]}}"#,
        )
        .unwrap();
        assert!(raw.steps_irimi.is_some());
        assert!(raw.steps.is_some());
        assert!(raw.steps_by_entry.is_none());
    }

    #[test]
    fn test_raw_technique_ignores_unknown_keys() {
        let raw: RawTechnique =
            serde_json::from_str(r#"{"slug":"ikkyo","somethingNew":42}"#).unwrap();
        assert_eq!(raw.slug.as_deref(), Some("ikkyo"));
    }
}

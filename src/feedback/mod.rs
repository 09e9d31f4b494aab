//! Hand-off data for the external feedback/issue relay
//!
//! The core resolves the identity of what the user was looking at; form
//! validation, payload assembly and delivery all live in the collaborator.

use serde::Serialize;

use crate::core::types::ContentKind;
use crate::technique::model::{Technique, VariantKey};
use crate::technique::variant_key;

/// Fully-resolved identity of the content item feedback refers to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackTarget {
    pub entity_type: ContentKind,
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantKey>,
}

impl FeedbackTarget {
    pub fn for_item(kind: ContentKind, id: impl Into<String>) -> Self {
        Self {
            entity_type: kind,
            entity_id: id.into(),
            variant: None,
        }
    }

    /// Target for a technique, optionally pinned to the variant the user
    /// was viewing when they filed feedback
    pub fn for_technique(technique: &Technique, variant: Option<&VariantKey>) -> Self {
        Self {
            entity_type: ContentKind::Technique,
            entity_id: technique.id.clone(),
            variant: variant.cloned(),
        }
    }

    /// Encoded variant key for relays that want the flat storage form
    pub fn variant_storage_key(&self) -> Option<String> {
        self.variant.as_ref().map(variant_key::encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EntryDirection, Hanmi, WeaponKind};

    #[test]
    fn test_target_serialization_shape() {
        let target = FeedbackTarget {
            entity_type: ContentKind::Technique,
            entity_id: "t-ikkyo".to_string(),
            variant: Some(VariantKey {
                hanmi: Hanmi::AiHanmi,
                direction: EntryDirection::Irimi,
                weapon: WeaponKind::Empty,
                version_id: None,
            }),
        };

        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["entityType"], "technique");
        assert_eq!(json["entityId"], "t-ikkyo");
        assert_eq!(json["variant"]["direction"], "irimi");
        assert_eq!(target.variant_storage_key().as_deref(), Some("ai-hanmi|irimi|empty|"));
    }

    #[test]
    fn test_item_target_has_no_variant() {
        let target = FeedbackTarget::for_item(ContentKind::Term, "kamae");
        assert_eq!(target.variant_storage_key(), None);
    }
}

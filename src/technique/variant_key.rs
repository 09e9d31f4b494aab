//! Canonical encode/decode between a variant key and its storage string
//!
//! The encoded form is `hanmi|direction|weapon|versionId`, with an empty
//! fourth component standing for the standard version. Decoding is total:
//! persisted keys written by older application versions may reference enum
//! values that no longer exist, so any unparseable input yields `None` and
//! callers treat it as "ignore this stored entry".

use crate::core::types::{EntryDirection, Hanmi, WeaponKind};
use crate::technique::model::VariantKey;

/// Delimiter for encoded variant keys; never appears in any component
pub const DELIMITER: char = '|';

pub fn encode(key: &VariantKey) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
        key.hanmi.as_str(),
        key.direction.as_str(),
        key.weapon.as_str(),
        key.version_id.as_deref().unwrap_or(""),
    )
}

/// Decode a storage string; returns `None` for anything outside the
/// closed domains. Components past the fourth are ignored.
pub fn decode(value: &str) -> Option<VariantKey> {
    let mut parts = value.split(DELIMITER);
    let hanmi = parts.next().and_then(Hanmi::from_wire)?;
    let direction = parts.next().and_then(EntryDirection::from_wire)?;
    let weapon = parts.next().and_then(WeaponKind::from_wire)?;
    let version_id = match parts.next() {
        Some(raw) if !raw.is_empty() => Some(raw.to_string()),
        _ => None,
    };

    Some(VariantKey {
        hanmi,
        direction,
        weapon,
        version_id,
    })
}

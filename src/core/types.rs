//! Core type definitions used throughout the codebase
//!
//! Every enumeration here is a closed domain: persisted data referencing a
//! value outside these sets is rejected by the defensive parsers rather
//! than round-tripped.

use serde::{Deserialize, Serialize};

/// Supported content locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    De,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::De];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

/// A value carried in every supported locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    pub en: T,
    pub de: T,
}

impl<T> Localized<T> {
    pub fn new(en: T, de: T) -> Self {
        Self { en, de }
    }

    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::De => &self.de,
        }
    }
}

/// Fixed, ordered grade scale used to classify techniques
///
/// Ordering follows rank progression: `Kyu5` is the first student grade,
/// `Dan5` the highest covered by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Grade {
    Kyu5 = 1,
    Kyu4 = 2,
    Kyu3 = 3,
    Kyu2 = 4,
    Kyu1 = 5,
    Dan1 = 6,
    Dan2 = 7,
    Dan3 = 8,
    Dan4 = 9,
    Dan5 = 10,
}

impl Grade {
    pub const ALL: [Grade; 10] = [
        Grade::Kyu5,
        Grade::Kyu4,
        Grade::Kyu3,
        Grade::Kyu2,
        Grade::Kyu1,
        Grade::Dan1,
        Grade::Dan2,
        Grade::Dan3,
        Grade::Dan4,
        Grade::Dan5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kyu5 => "kyu5",
            Self::Kyu4 => "kyu4",
            Self::Kyu3 => "kyu3",
            Self::Kyu2 => "kyu2",
            Self::Kyu1 => "kyu1",
            Self::Dan1 => "dan1",
            Self::Dan2 => "dan2",
            Self::Dan3 => "dan3",
            Self::Dan4 => "dan4",
            Self::Dan5 => "dan5",
        }
    }

    /// Parse the wire form; anything outside the fixed scale is rejected
    pub fn from_wire(value: &str) -> Option<Grade> {
        Self::ALL.iter().copied().find(|g| g.as_str() == value)
    }

    /// Returns true if this grade is a dan (black belt) grade
    pub fn is_dan(&self) -> bool {
        *self >= Grade::Dan1
    }
}

/// Stance orientation a technique is performed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hanmi {
    AiHanmi,
    GyakuHanmi,
}

impl Hanmi {
    pub const ALL: [Hanmi; 2] = [Hanmi::AiHanmi, Hanmi::GyakuHanmi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiHanmi => "ai-hanmi",
            Self::GyakuHanmi => "gyaku-hanmi",
        }
    }

    pub fn from_wire(value: &str) -> Option<Hanmi> {
        Self::ALL.iter().copied().find(|h| h.as_str() == value)
    }
}

impl Default for Hanmi {
    fn default() -> Self {
        Hanmi::AiHanmi
    }
}

/// Movement-entry style for executing a technique
///
/// `ALL` fixes the canonical iteration order; derivation and migration
/// both walk directions in this order so their output is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Irimi,
    Omote,
    Tenkan,
    Ura,
}

impl EntryDirection {
    pub const ALL: [EntryDirection; 4] = [
        EntryDirection::Irimi,
        EntryDirection::Omote,
        EntryDirection::Tenkan,
        EntryDirection::Ura,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Irimi => "irimi",
            Self::Omote => "omote",
            Self::Tenkan => "tenkan",
            Self::Ura => "ura",
        }
    }

    pub fn from_wire(value: &str) -> Option<EntryDirection> {
        Self::ALL.iter().copied().find(|d| d.as_str() == value)
    }
}

impl Default for EntryDirection {
    fn default() -> Self {
        EntryDirection::Irimi
    }
}

/// Implement context of a technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Empty,
    Bokken,
    Jo,
    Tanto,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Empty,
        WeaponKind::Bokken,
        WeaponKind::Jo,
        WeaponKind::Tanto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bokken => "bokken",
            Self::Jo => "jo",
            Self::Tanto => "tanto",
        }
    }

    pub fn from_wire(value: &str) -> Option<WeaponKind> {
        Self::ALL.iter().copied().find(|w| w.as_str() == value)
    }
}

impl Default for WeaponKind {
    fn default() -> Self {
        WeaponKind::Empty
    }
}

/// Kind of media reference attached to content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Youtube,
    Gumlet,
    GumletDab,
    Link,
    Image,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::Youtube,
        MediaType::Gumlet,
        MediaType::GumletDab,
        MediaType::Link,
        MediaType::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Gumlet => "gumlet",
            Self::GumletDab => "gumlet-dab",
            Self::Link => "link",
            Self::Image => "image",
        }
    }

    pub fn from_wire(value: &str) -> Option<MediaType> {
        Self::ALL.iter().copied().find(|m| m.as_str() == value)
    }
}

/// A single media reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Item-type domain shared by study keys, recents and the feedback relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Technique,
    Term,
    Exercise,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Technique,
        ContentKind::Term,
        ContentKind::Exercise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technique => "technique",
            Self::Term => "term",
            Self::Exercise => "exercise",
        }
    }

    pub fn from_wire(value: &str) -> Option<ContentKind> {
        Self::ALL.iter().copied().find(|k| k.as_str() == value)
    }
}

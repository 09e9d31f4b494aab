//! Schema validation for raw lesson records
//!
//! `validate` turns a permissively-parsed `RawTechnique` into a typed
//! `Technique`, or fails with the complete list of issues found. Locale
//! arrays that differ in length are a distinct issue kind from missing
//! fields so batch tooling can report exactly which locale is short.
//! Validation is a pure check; migration and normalization happen in the
//! loader, after it.

use std::fmt;

use serde::Serialize;

use crate::content::schema::{
    RawLocalizedArray, RawLocalizedString, RawMediaItem, RawTechnique, RawVersion,
};
use crate::core::types::{Grade, Hanmi, Localized, MediaItem, MediaType};
use crate::technique::model::{
    LocalizedSteps, MediaByEntry, StepsByEntry, Technique, Uke, Version,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    MissingField,
    EmptyField,
    InvalidValue,
    LengthMismatch,
    SlugMismatch,
}

/// One validation failure, scoped to a field path within the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub path: String,
    pub message: String,
}

impl Issue {
    fn new(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub fn validate(raw: &RawTechnique, expected_slug: &str) -> Result<Technique, Vec<Issue>> {
    let mut issues = Vec::new();

    let id = check_string(&mut issues, "id", &raw.id);
    let slug = check_string(&mut issues, "slug", &raw.slug);
    let name = check_localized_string(&mut issues, "name", &raw.name);
    let category = check_string(&mut issues, "category", &raw.category);
    let summary = check_localized_string(&mut issues, "summary", &raw.summary);

    if let Some(slug) = &slug {
        if slug != expected_slug {
            issues.push(Issue::new(
                IssueKind::SlugMismatch,
                "slug",
                format!("expected \"{expected_slug}\" but found \"{slug}\""),
            ));
        }
    }

    let level = match &raw.level {
        None => {
            issues.push(Issue::new(IssueKind::MissingField, "level", "level is required"));
            None
        }
        Some(value) => match Grade::from_wire(value) {
            Some(grade) => Some(grade),
            None => {
                issues.push(Issue::new(
                    IssueKind::InvalidValue,
                    "level",
                    format!("\"{value}\" is not a known grade"),
                ));
                None
            }
        },
    };

    let tags = match &raw.tags {
        None => {
            issues.push(Issue::new(IssueKind::MissingField, "tags", "tags is required"));
            Vec::new()
        }
        Some(tags) => {
            for (i, tag) in tags.iter().enumerate() {
                if tag.trim().is_empty() {
                    issues.push(Issue::new(
                        IssueKind::EmptyField,
                        format!("tags[{i}]"),
                        "tag must not be empty",
                    ));
                }
            }
            tags.clone()
        }
    };

    let versions = match &raw.versions {
        None => {
            issues.push(Issue::new(
                IssueKind::MissingField,
                "versions",
                "versions is required",
            ));
            Vec::new()
        }
        Some(raw_versions) if raw_versions.is_empty() => {
            issues.push(Issue::new(
                IssueKind::EmptyField,
                "versions",
                "at least one version is required",
            ));
            Vec::new()
        }
        Some(raw_versions) => raw_versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| validate_version(&mut issues, i, v))
            .collect(),
    };

    if !issues.is_empty() {
        return Err(issues);
    }

    Ok(Technique {
        id: id.unwrap_or_default(),
        slug: slug.unwrap_or_default(),
        name: name.unwrap_or_default(),
        jp: raw.jp.clone(),
        category: category.unwrap_or_default(),
        attack: raw.attack.clone(),
        weapon: raw.weapon.clone(),
        level: level.unwrap_or(Grade::Kyu5),
        aliases: raw.aliases.clone().unwrap_or_default(),
        summary: summary.unwrap_or_default(),
        tags,
        versions,
        versions_meta: Vec::new(),
        variants: Vec::new(),
    })
}

fn validate_version(issues: &mut Vec<Issue>, index: usize, raw: &RawVersion) -> Option<Version> {
    let before = issues.len();
    let at = |field: &str| format!("versions[{index}].{field}");

    let id = check_string(issues, at("id"), &raw.id);

    let hanmi = match &raw.hanmi {
        None => {
            issues.push(Issue::new(IssueKind::MissingField, at("hanmi"), "hanmi is required"));
            None
        }
        Some(value) => match Hanmi::from_wire(value) {
            Some(hanmi) => Some(hanmi),
            None => {
                issues.push(Issue::new(
                    IssueKind::InvalidValue,
                    at("hanmi"),
                    format!("\"{value}\" is not a known hanmi"),
                ));
                None
            }
        },
    };

    let mut steps_by_entry = StepsByEntry::default();
    let mut media_by_entry: Option<MediaByEntry> = None;
    if let Some(raw_steps) = &raw.steps_by_entry {
        let entries = [
            ("irimi", &raw_steps.irimi),
            ("omote", &raw_steps.omote),
            ("tenkan", &raw_steps.tenkan),
            ("ura", &raw_steps.ura),
        ];
        for (direction, value) in entries {
            if let Some(steps) = check_localized_array_opt(
                issues,
                format!("versions[{index}].stepsByEntry.{direction}"),
                value,
            ) {
                match direction {
                    "irimi" => steps_by_entry.irimi = Some(steps),
                    "omote" => steps_by_entry.omote = Some(steps),
                    "tenkan" => steps_by_entry.tenkan = Some(steps),
                    _ => steps_by_entry.ura = Some(steps),
                }
            }
        }

        if let Some(raw_media) = &raw_steps.media {
            media_by_entry = Some(MediaByEntry {
                irimi: check_media_list(issues, at("stepsByEntry.media.irimi"), &raw_media.irimi),
                omote: check_media_list(issues, at("stepsByEntry.media.omote"), &raw_media.omote),
                tenkan: check_media_list(issues, at("stepsByEntry.media.tenkan"), &raw_media.tenkan),
                ura: check_media_list(issues, at("stepsByEntry.media.ura"), &raw_media.ura),
            });
        }
    }

    let steps = check_localized_array_opt(issues, at("steps"), &raw.steps);
    let steps_irimi = check_localized_array_opt(issues, at("stepsIrimi"), &raw.steps_irimi);
    let steps_omote = check_localized_array_opt(issues, at("stepsOmote"), &raw.steps_omote);
    let steps_tenkan = check_localized_array_opt(issues, at("stepsTenkan"), &raw.steps_tenkan);
    let steps_ura = check_localized_array_opt(issues, at("stepsUra"), &raw.steps_ura);

    // Legacy shapes count: a version is only invalid when it has no step
    // content in any known form.
    let has_steps = !steps_by_entry.is_empty()
        || steps.is_some()
        || steps_irimi.is_some()
        || steps_omote.is_some()
        || steps_tenkan.is_some()
        || steps_ura.is_some();
    if !has_steps {
        issues.push(Issue::new(
            IssueKind::MissingField,
            at("stepsByEntry"),
            "at least one entry direction must be provided",
        ));
    }

    let uke = match &raw.uke {
        None => {
            issues.push(Issue::new(IssueKind::MissingField, at("uke"), "uke is required"));
            None
        }
        Some(raw_uke) => {
            let role = check_localized_string(issues, at("uke.role"), &raw_uke.role);
            let notes = check_localized_array_req(issues, at("uke.notes"), &raw_uke.notes);
            match (role, notes) {
                (Some(role), Some(notes)) => Some(Uke { role, notes }),
                _ => None,
            }
        }
    };

    let key_points = check_localized_array_opt(issues, at("keyPoints"), &raw.key_points);
    let common_mistakes =
        check_localized_array_req(issues, at("commonMistakes"), &raw.common_mistakes);
    let context = check_localized_string_opt(issues, at("context"), &raw.context);

    let media = match &raw.media {
        None => Vec::new(),
        Some(items) => check_media_items(issues, at("media"), items),
    };

    if issues.len() > before {
        return None;
    }

    Some(Version {
        id: id?,
        trainer_id: raw.trainer_id.clone(),
        dojo_id: raw.dojo_id.clone(),
        label: raw.label.clone(),
        hanmi: hanmi?,
        steps_by_entry,
        steps,
        steps_irimi,
        steps_omote,
        steps_tenkan,
        steps_ura,
        uke: uke?,
        key_points,
        common_mistakes: common_mistakes?,
        context,
        media,
        media_by_entry,
    })
}

fn check_string(
    issues: &mut Vec<Issue>,
    path: impl Into<String>,
    value: &Option<String>,
) -> Option<String> {
    let path = path.into();
    match value {
        None => {
            issues.push(Issue::new(
                IssueKind::MissingField,
                path.clone(),
                format!("{path} is required"),
            ));
            None
        }
        Some(value) if value.trim().is_empty() => {
            issues.push(Issue::new(
                IssueKind::EmptyField,
                path.clone(),
                format!("{path} must not be empty"),
            ));
            None
        }
        Some(value) => Some(value.clone()),
    }
}

fn check_localized_string(
    issues: &mut Vec<Issue>,
    path: impl Into<String>,
    value: &Option<RawLocalizedString>,
) -> Option<Localized<String>> {
    let path = path.into();
    let Some(value) = value else {
        issues.push(Issue::new(
            IssueKind::MissingField,
            path.clone(),
            format!("{path} is required"),
        ));
        return None;
    };

    let mut ok = true;
    for (locale, text) in [("en", &value.en), ("de", &value.de)] {
        match text {
            None => {
                issues.push(Issue::new(
                    IssueKind::MissingField,
                    format!("{path}.{locale}"),
                    format!("{path}.{locale} is required"),
                ));
                ok = false;
            }
            Some(text) if text.trim().is_empty() => {
                issues.push(Issue::new(
                    IssueKind::EmptyField,
                    format!("{path}.{locale}"),
                    format!("{path}.{locale} must not be empty"),
                ));
                ok = false;
            }
            Some(_) => {}
        }
    }

    if !ok {
        return None;
    }
    Some(Localized::new(value.en.clone()?, value.de.clone()?))
}

/// Localized string that may be empty in either locale (context text)
fn check_localized_string_opt(
    issues: &mut Vec<Issue>,
    path: impl Into<String>,
    value: &Option<RawLocalizedString>,
) -> Option<Localized<String>> {
    let path = path.into();
    let value = value.as_ref()?;

    let mut ok = true;
    for (locale, text) in [("en", &value.en), ("de", &value.de)] {
        if text.is_none() {
            issues.push(Issue::new(
                IssueKind::MissingField,
                format!("{path}.{locale}"),
                format!("{path}.{locale} is required"),
            ));
            ok = false;
        }
    }

    if !ok {
        return None;
    }
    Some(Localized::new(value.en.clone()?, value.de.clone()?))
}

fn check_localized_array(
    issues: &mut Vec<Issue>,
    path: &str,
    value: &RawLocalizedArray,
) -> Option<LocalizedSteps> {
    let mut ok = true;
    for (locale, entries) in [("en", &value.en), ("de", &value.de)] {
        if entries.is_none() {
            issues.push(Issue::new(
                IssueKind::MissingField,
                format!("{path}.{locale}"),
                format!("{path}.{locale} is required"),
            ));
            ok = false;
        }
    }
    if !ok {
        return None;
    }

    let en = value.en.clone()?;
    let de = value.de.clone()?;
    if en.len() != de.len() {
        issues.push(Issue::new(
            IssueKind::LengthMismatch,
            path.to_string(),
            format!("{path}.en and {path}.de must contain the same number of entries"),
        ));
        return None;
    }

    Some(Localized::new(en, de))
}

fn check_localized_array_req(
    issues: &mut Vec<Issue>,
    path: impl Into<String>,
    value: &Option<RawLocalizedArray>,
) -> Option<LocalizedSteps> {
    let path = path.into();
    match value {
        None => {
            issues.push(Issue::new(
                IssueKind::MissingField,
                path.clone(),
                format!("{path} is required"),
            ));
            None
        }
        Some(value) => check_localized_array(issues, &path, value),
    }
}

fn check_localized_array_opt(
    issues: &mut Vec<Issue>,
    path: impl Into<String>,
    value: &Option<RawLocalizedArray>,
) -> Option<LocalizedSteps> {
    let path = path.into();
    value
        .as_ref()
        .and_then(|value| check_localized_array(issues, &path, value))
}

fn check_media_items(
    issues: &mut Vec<Issue>,
    path: String,
    items: &[RawMediaItem],
) -> Vec<MediaItem> {
    let mut media = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{i}]");

        let media_type = match &item.media_type {
            None => {
                issues.push(Issue::new(
                    IssueKind::MissingField,
                    format!("{item_path}.type"),
                    "media type is required",
                ));
                continue;
            }
            Some(value) => match MediaType::from_wire(value) {
                Some(media_type) => media_type,
                None => {
                    issues.push(Issue::new(
                        IssueKind::InvalidValue,
                        format!("{item_path}.type"),
                        format!("\"{value}\" is not a known media type"),
                    ));
                    continue;
                }
            },
        };

        match &item.url {
            Some(url) if !url.trim().is_empty() => media.push(MediaItem {
                media_type,
                url: url.clone(),
                title: item.title.clone(),
            }),
            _ => issues.push(Issue::new(
                IssueKind::EmptyField,
                format!("{item_path}.url"),
                "media url must not be empty",
            )),
        }
    }
    media
}

fn check_media_list(
    issues: &mut Vec<Issue>,
    path: String,
    items: &Option<Vec<RawMediaItem>>,
) -> Vec<MediaItem> {
    match items {
        None => Vec::new(),
        Some(items) => check_media_items(issues, path, items),
    }
}

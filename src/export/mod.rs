//! Serialization of a session's published outputs into one JSON document.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{Enrichment, LabelSource, ObjectSuggestion, PipelineRecord};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypesSection {
    pub profession: String,
    pub source: LabelSource,
    pub original_object_types: Vec<String>,
    pub confirmed_object_types: Vec<String>,
    pub added_object_types: Vec<String>,
    pub removed_object_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitiesSection {
    pub profession: String,
    pub source: LabelSource,
    pub original_activities: Vec<String>,
    pub confirmed_activities: Vec<String>,
    pub added_activities: Vec<String>,
    pub removed_activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectsSection {
    pub total_rows: usize,
    pub gpt_suggestions: Vec<ObjectSuggestion>,
    pub confirmed_objects: Vec<ObjectSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentSection {
    pub gpt_suggestions: Vec<Enrichment>,
    pub reviewed_sample: Vec<Enrichment>,
    pub activity_rating: u8,
    pub object_rating: u8,
}

/// Fixed four-section export. A stage that never completed is written as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default, with = "section")]
    pub step1: Option<ObjectTypesSection>,
    #[serde(default, with = "section")]
    pub step2: Option<ActivitiesSection>,
    #[serde(default, with = "section")]
    pub step3: Option<ObjectsSection>,
    #[serde(default, with = "section")]
    pub step4: Option<EnrichmentSection>,
}

pub fn assemble(record: &PipelineRecord) -> ExportDocument {
    let profession = record.profession.clone().unwrap_or_default();

    ExportDocument {
        step1: record.object_types.as_ref().map(|set| ObjectTypesSection {
            profession: profession.clone(),
            source: set.source,
            original_object_types: set.original.clone(),
            confirmed_object_types: set.confirmed.clone(),
            added_object_types: set.added.clone(),
            removed_object_types: set.removed.clone(),
        }),
        step2: record.activities.as_ref().map(|set| ActivitiesSection {
            profession: profession.clone(),
            source: set.source,
            original_activities: set.original.clone(),
            confirmed_activities: set.confirmed.clone(),
            added_activities: set.added.clone(),
            removed_activities: set.removed.clone(),
        }),
        step3: record.objects.as_ref().map(|objects| ObjectsSection {
            total_rows: objects.total_rows,
            gpt_suggestions: objects.suggestions.clone(),
            confirmed_objects: objects
                .confirmed
                .iter()
                .map(|instance| instance.to_suggestion())
                .collect(),
        }),
        step4: record.enrichment.as_ref().map(|enrichment| EnrichmentSection {
            gpt_suggestions: enrichment.suggestions.clone(),
            reviewed_sample: enrichment.reviewed_sample.clone(),
            activity_rating: enrichment.ratings.activity,
            object_rating: enrichment.ratings.object,
        }),
    }
}

impl ExportDocument {
    /// Four-space indented JSON.
    pub fn to_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize export")?;
        String::from_utf8(buffer).context("Export is not valid UTF-8")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse export")
    }
}

/// Lowercased profession with every run of non-word characters replaced by `_`.
pub fn profession_slug(profession: &str) -> String {
    NON_WORD
        .replace_all(&profession.to_lowercase(), "_")
        .into_owned()
}

pub fn file_name(profession: &str, captured_at: NaiveDateTime) -> String {
    format!(
        "{}_results_{}.json",
        profession_slug(profession),
        captured_at.format("%Y%m%d_%H%M%S")
    )
}

/// Assemble `record` and write it into `dir`; returns the written path.
pub fn write_to(dir: &Path, record: &PipelineRecord, captured_at: NaiveDateTime) -> Result<PathBuf> {
    let document = assemble(record);
    let path = dir.join(file_name(
        record.profession.as_deref().unwrap_or_default(),
        captured_at,
    ));
    std::fs::write(&path, document.to_json()?)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    log::info!("Exported session results to {}", path.display());
    Ok(path)
}

/// `Option<T>` as either the section itself or an empty object.
mod section {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(section) => section.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Object(map) if map.is_empty() => Ok(None),
            Value::Null => Ok(None),
            _ => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabelSet, ObjectInstance, ObjectOutput, SessionMode};
    use chrono::NaiveDate;

    fn captured_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    #[test]
    fn slug_collapses_non_word_runs() {
        assert_eq!(profession_slug("Academic staff"), "academic_staff");
        assert_eq!(profession_slug("HR / Recruiting"), "hr_recruiting");
        assert_eq!(
            file_name("Academic staff", captured_at()),
            "academic_staff_results_20240305_140709.json"
        );
    }

    #[test]
    fn empty_record_exports_empty_sections() {
        let json = assemble(&PipelineRecord::default()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for step in ["step1", "step2", "step3", "step4"] {
            assert_eq!(value[step], serde_json::json!({}));
        }
        assert!(json.contains("\n    \"step1\": {}"));
    }

    #[test]
    fn partial_record_round_trips() {
        let record = PipelineRecord {
            mode: SessionMode::Generated,
            profession: Some("Recruiter".into()),
            object_types: Some(LabelSet {
                original: vec!["students".into(), "courses".into()],
                confirmed: vec!["students".into(), "grants".into()],
                added: vec!["grants".into()],
                removed: vec!["courses".into()],
                source: LabelSource::Generated,
            }),
            objects: Some(ObjectOutput {
                total_rows: 42,
                suggestions: vec![ObjectSuggestion {
                    object: "jane doe".into(),
                    object_type: "applicants".into(),
                }],
                confirmed: vec![ObjectInstance {
                    object: "jane doe".into(),
                    object_type: "applicants".into(),
                    confirmed: true,
                }],
            }),
            ..PipelineRecord::default()
        };

        let document = assemble(&record);
        let json = document.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["step1"]["source"], "generated");
        assert_eq!(value["step1"]["added_object_types"], serde_json::json!(["grants"]));
        assert_eq!(value["step2"], serde_json::json!({}));
        assert_eq!(value["step3"]["confirmed_objects"][0]["object_type"], "applicants");

        assert_eq!(ExportDocument::from_json(&json).unwrap(), document);
    }
}

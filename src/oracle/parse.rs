//! Strict decoding of suggestion-service answers.
//!
//! The answer is free text that should contain a JSON array, possibly in a
//! fenced code block. Every element is validated before anything downstream
//! sees it; on failure the raw text travels with the error.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Enrichment, ObjectSuggestion};

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{reason}")]
pub struct FormatError {
    pub reason: String,
    pub raw: String,
}

impl FormatError {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// Return the JSON payload of an answer, unwrapping the first fenced block.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    let body = if let Some((_, rest)) = trimmed.split_once("```json") {
        rest
    } else if let Some((_, rest)) = trimmed.split_once("```") {
        rest
    } else {
        return trimmed;
    };

    let body = body.split_once("```").map(|(inner, _)| inner).unwrap_or(body);
    body.trim()
}

fn parse_array(raw: &str) -> Result<Vec<Value>, FormatError> {
    let payload = extract_json(raw);
    let value: Value = serde_json::from_str(payload)
        .map_err(|err| FormatError::new(format!("invalid JSON: {err}"), raw))?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(FormatError::new(
            format!("expected a JSON array, found {}", kind(&other)),
            raw,
        )),
    }
}

/// A flat list of labels. Blank entries are dropped, exact repeats collapsed.
pub fn parse_labels(raw: &str) -> Result<Vec<String>, FormatError> {
    let mut labels: Vec<String> = Vec::new();

    for (index, item) in parse_array(raw)?.into_iter().enumerate() {
        let Value::String(label) = item else {
            return Err(FormatError::new(
                format!("element {index} is {}, expected a string", kind(&item)),
                raw,
            ));
        };
        let label = label.trim();
        if !label.is_empty() && !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }

    Ok(labels)
}

/// `{object, object_type}` records; both fields must be non-empty strings.
pub fn parse_objects(raw: &str) -> Result<Vec<ObjectSuggestion>, FormatError> {
    parse_array(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: ObjectSuggestion = serde_json::from_value(item)
                .map_err(|err| FormatError::new(format!("element {index}: {err}"), raw))?;
            if record.object.trim().is_empty() || record.object_type.trim().is_empty() {
                return Err(FormatError::new(
                    format!("element {index}: object and object_type must not be empty"),
                    raw,
                ));
            }
            Ok(ObjectSuggestion {
                object: record.object.trim().to_string(),
                object_type: record.object_type.trim().to_string(),
            })
        })
        .collect()
}

#[derive(Deserialize)]
struct EnrichmentWire {
    title: String,
    #[serde(default)]
    activities: Option<Vec<String>>,
    #[serde(default)]
    objects: Option<Vec<String>>,
}

/// `{title, activities, objects}` records. Missing or null lists read as empty.
pub fn parse_enrichments(raw: &str) -> Result<Vec<Enrichment>, FormatError> {
    parse_array(raw)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let wire: EnrichmentWire = serde_json::from_value(item)
                .map_err(|err| FormatError::new(format!("element {index}: {err}"), raw))?;
            Ok(Enrichment {
                title: wire.title,
                activities: wire.activities.unwrap_or_default(),
                objects: wire.objects.unwrap_or_default(),
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

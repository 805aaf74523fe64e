//! The accumulated, publishable outputs of one annotation session.

use serde::{Deserialize, Serialize};

use super::{Enrichment, LabelSet, ObjectInstance, ObjectSuggestion, QualityRatings, TitleSummaryTable};

/// Whether object types and activities start from the built-in academic
/// lists or from generated suggestions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    Predefined,
    #[default]
    Generated,
}

/// Published output of the object-instance stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectOutput {
    pub total_rows: usize,
    pub suggestions: Vec<ObjectSuggestion>,
    pub confirmed: Vec<ObjectInstance>,
}

impl ObjectOutput {
    pub fn object_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for instance in &self.confirmed {
            if !names.contains(&instance.object) {
                names.push(instance.object.clone());
            }
        }
        names
    }
}

/// Published output of the enrichment stage.
///
/// `suggestions` is every valid record across all batches; `reviewed_sample`
/// is the operator-edited subset. They are kept side by side, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentOutput {
    pub suggestions: Vec<Enrichment>,
    pub reviewed_sample: Vec<Enrichment>,
    pub ratings: QualityRatings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRecord {
    pub mode: SessionMode,
    pub profession: Option<String>,
    pub summary: Option<TitleSummaryTable>,
    pub object_types: Option<LabelSet>,
    pub activities: Option<LabelSet>,
    pub objects: Option<ObjectOutput>,
    pub enrichment: Option<EnrichmentOutput>,
}

use serde::{Deserialize, Serialize};

/// Where the original set of a curated label list came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    Predefined,
    Generated,
}

impl LabelSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSource::Predefined => "predefined",
            LabelSource::Generated => "generated",
        }
    }
}

/// A confirmed label list (object types or activities) with its provenance.
///
/// `added` and `removed` are always the exact-match difference between
/// `confirmed` and `original`, sorted for stable output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSet {
    pub original: Vec<String>,
    pub confirmed: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub source: LabelSource,
}

impl LabelSet {
    pub fn contains(&self, label: &str) -> bool {
        self.confirmed.iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty()
    }
}

use serde::{Deserialize, Serialize};

/// A concrete entity suggested for one of the confirmed object types.
///
/// Field names follow the suggestion service's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSuggestion {
    pub object: String,
    pub object_type: String,
}

/// A reviewed object row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    pub object: String,
    pub object_type: String,
    pub confirmed: bool,
}

impl ObjectInstance {
    pub fn to_suggestion(&self) -> ObjectSuggestion {
        ObjectSuggestion {
            object: self.object.clone(),
            object_type: self.object_type.clone(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::InputValidationError;

/// Activities and objects associated with a single window title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub title: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub objects: Vec<String>,
}

impl Enrichment {
    /// Retention predicate: a title only counts when both lists are filled.
    pub fn is_valid(&self) -> bool {
        !self.activities.is_empty() && !self.objects.is_empty()
    }
}

/// Operator's 1..=5 ratings of the suggested labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRatings {
    pub activity: u8,
    pub object: u8,
}

impl QualityRatings {
    pub fn new(activity: u8, object: u8) -> Result<Self, InputValidationError> {
        check_rating("activity", activity)?;
        check_rating("object", object)?;
        Ok(Self { activity, object })
    }
}

fn check_rating(name: &'static str, value: u8) -> Result<(), InputValidationError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(InputValidationError::Rating { name, value })
    }
}

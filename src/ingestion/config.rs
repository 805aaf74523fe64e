use serde::{Deserialize, Serialize};

/// Tunable thresholds for turning a raw log into a title summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregationConfig {
    /// Field separator of the uploaded table.
    pub delimiter: char,

    /// Titles seen on fewer distinct calendar days are dropped entirely.
    pub min_distinct_days: usize,

    /// Upper bound on summary rows handed to the suggestion service.
    pub max_titles: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            min_distinct_days: 2,
            max_titles: 500,
        }
    }
}

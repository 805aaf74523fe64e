//! Window-focus events and the per-title summary derived from them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the uploaded activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub title: String,
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RawEvent {
    pub fn new(title: impl Into<String>, begin: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            begin,
            end,
        }
    }

    /// Calendar date the event started on.
    pub fn date(&self) -> NaiveDate {
        self.begin.date()
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end - self.begin).num_milliseconds() as f64 / 1000.0
    }
}

/// Aggregated focus time for one window title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSummary {
    pub title: String,
    pub total_duration_secs: f64,
    pub frequency: u32,
}

/// Ranked title summary plus the size of the population it was cut from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSummaryTable {
    pub entries: Vec<TitleSummary>,
    /// Rows that survived the distinct-day filter, before truncation.
    pub total_filtered_rows: usize,
}

impl TitleSummaryTable {
    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

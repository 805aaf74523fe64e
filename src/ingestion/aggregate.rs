use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use log::info;

use crate::error::InputValidationError;
use crate::ingestion::config::AggregationConfig;
use crate::models::{RawEvent, TitleSummary, TitleSummaryTable};

/// Per-title running totals.
#[derive(Debug, Default)]
struct TitleGroup {
    dates: HashSet<NaiveDate>,
    total_duration_secs: f64,
    rows: u32,
}

/// Reduce raw events to a ranked, bounded title summary.
///
/// Titles seen on fewer than `min_distinct_days` calendar days are dropped
/// with all their rows. The survivors are ranked by summed duration and cut
/// to `max_titles`; `total_filtered_rows` counts survivors before the cut.
pub fn aggregate(
    events: &[RawEvent],
    config: &AggregationConfig,
) -> Result<TitleSummaryTable, InputValidationError> {
    if events.is_empty() {
        return Err(InputValidationError::Empty);
    }

    // Step 1: group by title
    let mut groups: BTreeMap<&str, TitleGroup> = BTreeMap::new();
    for event in events {
        let group = groups.entry(event.title.as_str()).or_default();
        group.dates.insert(event.date());
        group.total_duration_secs += event.duration_secs();
        group.rows += 1;
    }

    // Step 2: distinct-day filter
    let retained: Vec<(&str, TitleGroup)> = groups
        .into_iter()
        .filter(|(_, group)| group.dates.len() >= config.min_distinct_days)
        .collect();
    let total_filtered_rows = retained.iter().map(|(_, g)| g.rows as usize).sum();

    // Step 3: rank and truncate
    let mut entries: Vec<TitleSummary> = retained
        .into_iter()
        .map(|(title, group)| TitleSummary {
            title: title.to_string(),
            total_duration_secs: group.total_duration_secs,
            frequency: group.rows,
        })
        .collect();
    entries.sort_by(|a, b| b.total_duration_secs.total_cmp(&a.total_duration_secs));
    entries.truncate(config.max_titles);

    info!(
        "Aggregated {} events into {} titles ({} rows after day filter)",
        events.len(),
        entries.len(),
        total_filtered_rows
    );

    Ok(TitleSummaryTable {
        entries,
        total_filtered_rows,
    })
}

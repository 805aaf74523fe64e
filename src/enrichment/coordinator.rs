use rand::{rngs::StdRng, seq::index, SeedableRng};
use serde::Serialize;

use crate::error::{StageError, StageResult};
use crate::models::{Enrichment, ObjectSuggestion};
use crate::oracle::{parse::parse_enrichments, Credential, SuggestionRequest, SuggestionService};
use crate::settings::EnrichmentSettings;

// Set to true to enable per-batch logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

/// Confirmed labels every batch is enriched against.
#[derive(Debug, Clone)]
pub struct EnrichmentContext<'a> {
    pub profession: &'a str,
    pub objects: &'a [ObjectSuggestion],
    pub activities: &'a [String],
    pub credential: &'a Credential,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BatchOutcome {
    Accepted { valid: usize, discarded: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub index: usize,
    pub size: usize,
    pub outcome: BatchOutcome,
}

impl BatchReport {
    pub fn failed(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentResult {
    /// Every record that passed the retention predicate, in batch order.
    pub all_valid: Vec<Enrichment>,
    /// Uniform sample of `all_valid` handed to the reviewer.
    pub review_sample: Vec<Enrichment>,
    pub batches: Vec<BatchReport>,
    /// Titles actually sent, after sampling down to the cap.
    pub titles_sent: usize,
}

/// Builds a sampling RNG: fixed when a seed is configured, entropy otherwise.
pub fn sampling_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Uniform sample of `amount` items without replacement, kept in input order.
pub fn sample_in_order<T: Clone>(items: &[T], amount: usize, rng: &mut StdRng) -> Vec<T> {
    if items.len() <= amount {
        return items.to_vec();
    }
    let mut picked = index::sample(rng, items.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| items[i].clone()).collect()
}

/// Associates titles with activities and objects in bounded batches.
///
/// Titles beyond `sample_cap` are sampled down, then sent `batch_size` at a
/// time, one call after another. A failed batch is reported and skipped;
/// only an empty overall result is an error.
pub async fn enrich(
    service: &mut SuggestionService,
    context: &EnrichmentContext<'_>,
    titles: &[String],
    settings: &EnrichmentSettings,
    refresh: bool,
) -> StageResult<EnrichmentResult> {
    let mut rng = sampling_rng(settings.seed);

    let selected = sample_in_order(titles, settings.sample_cap, &mut rng);
    if selected.len() < titles.len() {
        log_info!(
            "Sampled {} of {} titles for enrichment",
            selected.len(),
            titles.len()
        );
    }

    let batch_size = settings.batch_size.max(1);
    let mut all_valid: Vec<Enrichment> = Vec::new();
    let mut batches: Vec<BatchReport> = Vec::new();

    for (index, chunk) in selected.chunks(batch_size).enumerate() {
        let request = SuggestionRequest::Enrichment {
            profession: context.profession.to_string(),
            objects: context.objects.to_vec(),
            activities: context.activities.to_vec(),
            titles: chunk.to_vec(),
        };

        let outcome = match service
            .suggest(&request, context.credential, refresh, parse_enrichments)
            .await
        {
            Ok(records) => {
                let total = records.len();
                let valid: Vec<Enrichment> =
                    records.into_iter().filter(Enrichment::is_valid).collect();
                let accepted = valid.len();
                all_valid.extend(valid);
                log_debug!(
                    "Batch {} ({} titles): kept {} of {} records",
                    index + 1,
                    chunk.len(),
                    accepted,
                    total
                );
                BatchOutcome::Accepted {
                    valid: accepted,
                    discarded: total - accepted,
                }
            }
            Err(err) => {
                log_warn!("Batch {} ({} titles) failed: {}", index + 1, chunk.len(), err);
                BatchOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };

        batches.push(BatchReport {
            index,
            size: chunk.len(),
            outcome,
        });
    }

    if all_valid.is_empty() {
        let failed_batches = batches.iter().filter(|b| b.failed()).count();
        log_error!(
            "No title was associated with both activities and objects ({} of {} batches failed)",
            failed_batches,
            batches.len()
        );
        return Err(StageError::NoEnrichmentFound {
            batches: batches.len(),
            failed_batches,
        });
    }

    let review_sample = sample_in_order(&all_valid, settings.review_sample_size, &mut rng);
    log_info!(
        "Enrichment finished: {} valid records from {} batches, {} sampled for review",
        all_valid.len(),
        batches.len(),
        review_sample.len()
    );

    Ok(EnrichmentResult {
        all_valid,
        review_sample,
        batches,
        titles_sent: selected.len(),
    })
}

//! Title enrichment: batched association of titles with activities and
//! objects, followed by operator review of a sample.

pub mod coordinator;
pub mod review;

pub use coordinator::{
    enrich, BatchOutcome, BatchReport, EnrichmentContext, EnrichmentResult,
};
pub use review::EnrichmentReview;

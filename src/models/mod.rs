pub mod enrichment;
pub mod event;
pub mod label_set;
pub mod object;
pub mod record;

pub use enrichment::{Enrichment, QualityRatings};
pub use event::{RawEvent, TitleSummary, TitleSummaryTable};
pub use label_set::{LabelSet, LabelSource};
pub use object::{ObjectInstance, ObjectSuggestion};
pub use record::{EnrichmentOutput, ObjectOutput, PipelineRecord, SessionMode};

pub mod controller;
pub mod stages;
pub mod state;

pub use controller::StagePipeline;
pub use state::{PendingEnrichment, PipelineContext, Requirement, Stage};

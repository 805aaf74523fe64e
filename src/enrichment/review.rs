use log::info;

use crate::error::{StageError, StageResult};
use crate::models::Enrichment;

/// Operator review of the sampled enrichment records.
///
/// Edits may only pick from the confirmed activities and the confirmed
/// object names; the full suggestion set is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentReview {
    records: Vec<Enrichment>,
    activity_options: Vec<String>,
    object_options: Vec<String>,
}

impl EnrichmentReview {
    pub fn new(
        sample: Vec<Enrichment>,
        activity_options: Vec<String>,
        object_options: Vec<String>,
    ) -> Self {
        Self {
            records: sample,
            activity_options,
            object_options,
        }
    }

    pub fn records(&self) -> &[Enrichment] {
        &self.records
    }

    pub fn activity_options(&self) -> &[String] {
        &self.activity_options
    }

    pub fn object_options(&self) -> &[String] {
        &self.object_options
    }

    pub fn set_activities(&mut self, index: usize, activities: Vec<String>) -> StageResult<()> {
        check_options("activity", &activities, &self.activity_options)?;
        self.record_mut(index)?.activities = activities;
        Ok(())
    }

    pub fn set_objects(&mut self, index: usize, objects: Vec<String>) -> StageResult<()> {
        check_options("object", &objects, &self.object_options)?;
        self.record_mut(index)?.objects = objects;
        Ok(())
    }

    pub fn finish(self) -> Vec<Enrichment> {
        info!("Reviewed {} enrichment records", self.records.len());
        self.records
    }

    fn record_mut(&mut self, index: usize) -> StageResult<&mut Enrichment> {
        let len = self.records.len();
        self.records.get_mut(index).ok_or_else(|| {
            StageError::InvalidEdit(format!("no reviewed record at {index} (sample has {len})"))
        })
    }
}

fn check_options(kind: &str, picked: &[String], allowed: &[String]) -> StageResult<()> {
    match picked.iter().find(|p| !allowed.contains(p)) {
        Some(unknown) => Err(StageError::InvalidEdit(format!(
            "'{unknown}' is not a confirmed {kind}"
        ))),
        None => Ok(()),
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use log::warn;

use crate::curation::{LabelCuration, ObjectCuration};
use crate::enrichment::{EnrichmentResult, EnrichmentReview};
use crate::error::{StageError, StageResult};
use crate::models::PipelineRecord;
use crate::oracle::Credential;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Ingestion,
    ObjectTypes,
    Activities,
    Objects,
    Enrichment,
    Export,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Ingestion => "ingestion",
            Stage::ObjectTypes => "object types",
            Stage::Activities => "activities",
            Stage::Objects => "objects",
            Stage::Enrichment => "enrichment",
            Stage::Export => "export",
        }
    }

    /// Stages whose published output is built on this stage's output.
    pub fn dependents(&self) -> &'static [Stage] {
        match self {
            Stage::Ingestion => &[Stage::Objects, Stage::Enrichment],
            Stage::ObjectTypes => &[Stage::Activities, Stage::Objects, Stage::Enrichment],
            Stage::Activities => &[Stage::Objects, Stage::Enrichment],
            Stage::Objects => &[Stage::Enrichment],
            Stage::Enrichment | Stage::Export => &[],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input a stage needs before it may run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Requirement {
    Summary,
    Profession,
    Credential,
    ObjectTypes,
    Activities,
    Objects,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Requirement::Summary => "an uploaded log",
            Requirement::Profession => "a profession",
            Requirement::Credential => "API key",
            Requirement::ObjectTypes => "confirmed object types",
            Requirement::Activities => "confirmed activities",
            Requirement::Objects => "confirmed objects",
        };
        f.write_str(text)
    }
}

/// Enrichment run awaiting review and ratings.
#[derive(Debug, Clone)]
pub struct PendingEnrichment {
    pub result: EnrichmentResult,
    pub review: EnrichmentReview,
}

/// Everything one annotation session knows.
///
/// `record` holds published outputs only; the `*_session` fields are
/// in-progress working sets that have not been confirmed yet.
#[derive(Debug)]
pub struct PipelineContext {
    pub session_id: String,
    pub record: PipelineRecord,
    pub credential: Option<Credential>,
    pub object_type_session: Option<LabelCuration>,
    pub activity_session: Option<LabelCuration>,
    pub object_session: Option<ObjectCuration>,
    pub enrichment_session: Option<PendingEnrichment>,
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineContext {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            record: PipelineRecord::default(),
            credential: None,
            object_type_session: None,
            activity_session: None,
            object_session: None,
            enrichment_session: None,
        }
    }

    pub fn requirements(stage: Stage) -> &'static [Requirement] {
        use Requirement::*;
        match stage {
            Stage::Ingestion | Stage::Export => &[],
            Stage::ObjectTypes => &[Profession, Credential],
            Stage::Activities => &[Profession, Credential, ObjectTypes],
            Stage::Objects => &[Summary, Credential, ObjectTypes, Activities],
            Stage::Enrichment => &[Summary, Credential, Objects, Activities],
        }
    }

    fn satisfied(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Summary => self.record.summary.is_some(),
            Requirement::Profession => self.record.profession.is_some(),
            Requirement::Credential => self.credential.is_some(),
            Requirement::ObjectTypes => self
                .record
                .object_types
                .as_ref()
                .is_some_and(|set| !set.is_empty()),
            Requirement::Activities => self
                .record
                .activities
                .as_ref()
                .is_some_and(|set| !set.is_empty()),
            Requirement::Objects => self.record.objects.is_some(),
        }
    }

    pub fn missing(&self, stage: Stage) -> Vec<Requirement> {
        Self::requirements(stage)
            .iter()
            .copied()
            .filter(|r| !self.satisfied(*r))
            .collect()
    }

    /// Block with a warning unless every input of `stage` is in place.
    pub fn require(&self, stage: Stage) -> StageResult<()> {
        let missing = self.missing(stage);
        if missing.is_empty() {
            return Ok(());
        }
        let err = StageError::StatePrecondition { stage, missing };
        warn!("{}", err);
        Err(err)
    }

    pub fn is_ready(&self, stage: Stage) -> bool {
        self.missing(stage).is_empty()
    }

    /// Drop the published output and working set of each listed stage.
    pub fn clear(&mut self, stages: &[Stage]) {
        for stage in stages {
            match stage {
                Stage::ObjectTypes => {
                    self.record.object_types = None;
                    self.object_type_session = None;
                }
                Stage::Activities => {
                    self.record.activities = None;
                    self.activity_session = None;
                }
                Stage::Objects => {
                    self.record.objects = None;
                    self.object_session = None;
                }
                Stage::Enrichment => {
                    self.record.enrichment = None;
                    self.enrichment_session = None;
                }
                Stage::Ingestion | Stage::Export => {}
            }
        }
    }

    /// Clear whatever was built on `stage`'s previous output.
    pub fn invalidate_dependents(&mut self, stage: Stage) {
        let dependents = stage.dependents();
        let stale: Vec<Stage> = dependents
            .iter()
            .copied()
            .filter(|s| self.has_output_or_session(*s))
            .collect();
        if !stale.is_empty() {
            warn!(
                "{} changed; discarding {}",
                stage,
                stale
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        self.clear(dependents);
    }

    fn has_output_or_session(&self, stage: Stage) -> bool {
        match stage {
            Stage::ObjectTypes => {
                self.record.object_types.is_some() || self.object_type_session.is_some()
            }
            Stage::Activities => self.record.activities.is_some() || self.activity_session.is_some(),
            Stage::Objects => self.record.objects.is_some() || self.object_session.is_some(),
            Stage::Enrichment => {
                self.record.enrichment.is_some() || self.enrichment_session.is_some()
            }
            Stage::Ingestion | Stage::Export => false,
        }
    }
}

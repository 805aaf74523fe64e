use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use chrono::Local;
use log::info;

use crate::curation::{LabelCuration, ObjectCuration};
use crate::enrichment::{EnrichmentResult, EnrichmentReview};
use crate::error::{StageError, StageResult};
use crate::export::{self, ExportDocument};
use crate::models::{
    EnrichmentOutput, LabelSet, ObjectOutput, PipelineRecord, QualityRatings, SessionMode,
};
use crate::oracle::{SuggestionOracle, SuggestionService};
use crate::settings::Settings;

use super::stages;
use super::state::{PipelineContext, Stage};

/// One annotation session: the context, the memoizing suggestion service
/// and the settings every stage reads.
pub struct StagePipeline {
    ctx: PipelineContext,
    service: SuggestionService,
    settings: Settings,
}

impl StagePipeline {
    pub fn new(oracle: Arc<dyn SuggestionOracle>, settings: Settings) -> Self {
        let ctx = PipelineContext::new();
        info!("Starting annotation session {}", ctx.session_id);
        Self {
            ctx,
            service: SuggestionService::new(oracle),
            settings,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.ctx.session_id
    }

    pub fn record(&self) -> &PipelineRecord {
        &self.ctx.record
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_ready(&self, stage: Stage) -> bool {
        self.ctx.is_ready(stage)
    }

    pub fn clear_suggestion_cache(&mut self) {
        self.service.clear_cache();
    }

    pub fn ingest(
        &mut self,
        log_text: &str,
        mode: SessionMode,
        profession: Option<&str>,
    ) -> StageResult<()> {
        stages::ingest(
            &mut self.ctx,
            log_text,
            mode,
            profession,
            &self.settings.aggregation,
        )
    }

    pub fn set_credential(&mut self, raw: &str) -> StageResult<()> {
        stages::set_credential(&mut self.ctx, raw)
    }

    pub async fn suggest_object_types(&mut self, refresh: bool) -> StageResult<&LabelCuration> {
        stages::start_object_types(&mut self.ctx, &mut self.service, refresh).await
    }

    pub fn object_types_mut(&mut self) -> StageResult<&mut LabelCuration> {
        self.ctx
            .object_type_session
            .as_mut()
            .ok_or(StageError::NothingToConfirm(Stage::ObjectTypes))
    }

    pub fn confirm_object_types(&mut self) -> StageResult<&LabelSet> {
        stages::confirm_object_types(&mut self.ctx)
    }

    pub async fn suggest_activities(&mut self, refresh: bool) -> StageResult<&LabelCuration> {
        stages::start_activities(&mut self.ctx, &mut self.service, refresh).await
    }

    pub fn activities_mut(&mut self) -> StageResult<&mut LabelCuration> {
        self.ctx
            .activity_session
            .as_mut()
            .ok_or(StageError::NothingToConfirm(Stage::Activities))
    }

    pub fn confirm_activities(&mut self) -> StageResult<&LabelSet> {
        stages::confirm_activities(&mut self.ctx)
    }

    pub async fn suggest_objects(&mut self, refresh: bool) -> StageResult<&ObjectCuration> {
        stages::start_objects(&mut self.ctx, &mut self.service, refresh).await
    }

    pub fn objects_mut(&mut self) -> StageResult<&mut ObjectCuration> {
        self.ctx
            .object_session
            .as_mut()
            .ok_or(StageError::NothingToConfirm(Stage::Objects))
    }

    pub fn confirm_objects(&mut self) -> StageResult<&ObjectOutput> {
        stages::confirm_objects(&mut self.ctx)
    }

    pub async fn enrich(&mut self, refresh: bool) -> StageResult<&EnrichmentResult> {
        stages::start_enrichment(
            &mut self.ctx,
            &mut self.service,
            &self.settings.enrichment,
            refresh,
        )
        .await
    }

    pub fn enrichment_review_mut(&mut self) -> StageResult<&mut EnrichmentReview> {
        self.ctx
            .enrichment_session
            .as_mut()
            .map(|pending| &mut pending.review)
            .ok_or(StageError::NothingToConfirm(Stage::Enrichment))
    }

    pub fn confirm_enrichment(&mut self, activity: u8, object: u8) -> StageResult<&EnrichmentOutput> {
        let ratings = QualityRatings::new(activity, object)?;
        stages::confirm_enrichment(&mut self.ctx, ratings)
    }

    /// Best effort: stages that never completed export as empty sections.
    pub fn export(&self) -> ExportDocument {
        export::assemble(&self.ctx.record)
    }

    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        export::write_to(dir, &self.ctx.record, Local::now().naive_local())
    }
}

//! Stage functions over an explicit [`PipelineContext`].
//!
//! Each function checks its own preconditions, reads only the fields it
//! depends on and writes only its own output.

use log::{info, warn};

use crate::curation::predefined::{academic_activities, academic_object_types, ACADEMIC_PROFESSION};
use crate::curation::{LabelCuration, ObjectCuration};
use crate::enrichment::{self, EnrichmentContext, EnrichmentResult, EnrichmentReview};
use crate::error::{InputValidationError, StageError, StageResult};
use crate::ingestion::{aggregate, parse_log, AggregationConfig};
use crate::models::{
    EnrichmentOutput, LabelSet, LabelSource, ObjectOutput, ObjectSuggestion, QualityRatings,
    SessionMode,
};
use crate::oracle::parse::{parse_labels, parse_objects};
use crate::oracle::{Credential, SuggestionRequest, SuggestionService};
use crate::settings::EnrichmentSettings;

use super::state::{PendingEnrichment, PipelineContext, Stage};

/// Parse and aggregate an uploaded log, fixing the session's mode and profession.
pub fn ingest(
    ctx: &mut PipelineContext,
    log_text: &str,
    mode: SessionMode,
    profession: Option<&str>,
    config: &AggregationConfig,
) -> StageResult<()> {
    let profession = match mode {
        SessionMode::Predefined => ACADEMIC_PROFESSION.to_string(),
        SessionMode::Generated => profession
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(InputValidationError::MissingProfession)?
            .to_string(),
    };

    let events = parse_log(log_text, config.delimiter)?;
    let summary = aggregate(&events, config)?;
    info!(
        "Ingested {} events into {} titles ({} rows after filtering)",
        events.len(),
        summary.len(),
        summary.total_filtered_rows
    );

    let identity_changed = ctx.record.profession.is_some()
        && (ctx.record.profession.as_deref() != Some(profession.as_str())
            || ctx.record.mode != mode);
    if identity_changed {
        warn!("Profession or mode changed; discarding every later stage");
        ctx.clear(&[
            Stage::ObjectTypes,
            Stage::Activities,
            Stage::Objects,
            Stage::Enrichment,
        ]);
    } else if ctx.record.summary.as_ref().is_some_and(|s| s != &summary) {
        ctx.invalidate_dependents(Stage::Ingestion);
    }

    ctx.record.mode = mode;
    ctx.record.profession = Some(profession);
    ctx.record.summary = Some(summary);
    Ok(())
}

/// Validate and store the caller's API key. May be replaced at any time.
pub fn set_credential(ctx: &mut PipelineContext, raw: &str) -> StageResult<()> {
    ctx.credential = Some(Credential::parse(raw)?);
    Ok(())
}

fn profession(ctx: &PipelineContext) -> String {
    ctx.record.profession.clone().unwrap_or_default()
}

fn credential(ctx: &PipelineContext, stage: Stage) -> StageResult<Credential> {
    ctx.credential
        .clone()
        .ok_or_else(|| StageError::StatePrecondition {
            stage,
            missing: vec![super::Requirement::Credential],
        })
}

fn confirmed(set: &Option<LabelSet>) -> Vec<String> {
    set.as_ref().map(|s| s.confirmed.clone()).unwrap_or_default()
}

/// Open a curation session for object types, seeded from the built-in
/// list or from the suggestion service.
pub async fn start_object_types<'a>(
    ctx: &'a mut PipelineContext,
    service: &mut SuggestionService,
    refresh: bool,
) -> StageResult<&'a LabelCuration> {
    ctx.require(Stage::ObjectTypes)?;

    let session = match ctx.record.mode {
        SessionMode::Predefined => {
            LabelCuration::new(academic_object_types(), LabelSource::Predefined)
        }
        SessionMode::Generated => {
            let request = SuggestionRequest::ObjectTypes {
                profession: profession(ctx),
            };
            let credential = credential(ctx, Stage::ObjectTypes)?;
            match service.suggest(&request, &credential, refresh, parse_labels).await {
                Ok(labels) => LabelCuration::new(labels, LabelSource::Generated),
                Err(err) => {
                    ctx.object_type_session = None;
                    return Err(err);
                }
            }
        }
    };

    Ok(&*ctx.object_type_session.insert(session))
}

pub fn confirm_object_types(ctx: &mut PipelineContext) -> StageResult<&LabelSet> {
    let labels = ctx
        .object_type_session
        .as_ref()
        .ok_or(StageError::NothingToConfirm(Stage::ObjectTypes))?
        .confirm();

    if ctx.record.object_types.as_ref().is_some_and(|old| old != &labels) {
        ctx.invalidate_dependents(Stage::ObjectTypes);
    }
    Ok(&*ctx.record.object_types.insert(labels))
}

pub async fn start_activities<'a>(
    ctx: &'a mut PipelineContext,
    service: &mut SuggestionService,
    refresh: bool,
) -> StageResult<&'a LabelCuration> {
    ctx.require(Stage::Activities)?;

    let session = match ctx.record.mode {
        SessionMode::Predefined => LabelCuration::new(academic_activities(), LabelSource::Predefined),
        SessionMode::Generated => {
            let request = SuggestionRequest::Activities {
                profession: profession(ctx),
                object_types: confirmed(&ctx.record.object_types),
            };
            let credential = credential(ctx, Stage::Activities)?;
            match service.suggest(&request, &credential, refresh, parse_labels).await {
                Ok(labels) => LabelCuration::new(labels, LabelSource::Generated),
                Err(err) => {
                    ctx.activity_session = None;
                    return Err(err);
                }
            }
        }
    };

    Ok(&*ctx.activity_session.insert(session))
}

pub fn confirm_activities(ctx: &mut PipelineContext) -> StageResult<&LabelSet> {
    let labels = ctx
        .activity_session
        .as_ref()
        .ok_or(StageError::NothingToConfirm(Stage::Activities))?
        .confirm();

    if ctx.record.activities.as_ref().is_some_and(|old| old != &labels) {
        ctx.invalidate_dependents(Stage::Activities);
    }
    Ok(&*ctx.record.activities.insert(labels))
}

/// Ask for object instances across every summary title and open the review grid.
pub async fn start_objects<'a>(
    ctx: &'a mut PipelineContext,
    service: &mut SuggestionService,
    refresh: bool,
) -> StageResult<&'a ObjectCuration> {
    ctx.require(Stage::Objects)?;

    let object_types = confirmed(&ctx.record.object_types);
    let request = SuggestionRequest::Objects {
        profession: profession(ctx),
        object_types: object_types.clone(),
        activities: confirmed(&ctx.record.activities),
        titles: ctx
            .record
            .summary
            .as_ref()
            .map(|s| s.titles())
            .unwrap_or_default(),
    };
    let credential = credential(ctx, Stage::Objects)?;

    match service.suggest(&request, &credential, refresh, parse_objects).await {
        Ok(suggestions) => Ok(&*ctx
            .object_session
            .insert(ObjectCuration::new(suggestions, object_types))),
        Err(err) => {
            ctx.object_session = None;
            Err(err)
        }
    }
}

pub fn confirm_objects(ctx: &mut PipelineContext) -> StageResult<&ObjectOutput> {
    let total_rows = ctx
        .record
        .summary
        .as_ref()
        .map(|s| s.total_filtered_rows)
        .unwrap_or_default();
    let output = ctx
        .object_session
        .as_ref()
        .ok_or(StageError::NothingToConfirm(Stage::Objects))?
        .confirm(total_rows);

    if ctx.record.objects.as_ref().is_some_and(|old| old != &output) {
        ctx.invalidate_dependents(Stage::Objects);
    }
    Ok(&*ctx.record.objects.insert(output))
}

/// Run batched enrichment over the summary titles and open the review of its sample.
pub async fn start_enrichment<'a>(
    ctx: &'a mut PipelineContext,
    service: &mut SuggestionService,
    settings: &EnrichmentSettings,
    refresh: bool,
) -> StageResult<&'a EnrichmentResult> {
    ctx.require(Stage::Enrichment)?;

    let profession = profession(ctx);
    let credential = credential(ctx, Stage::Enrichment)?;
    let activities = confirmed(&ctx.record.activities);
    let (objects, object_names): (Vec<ObjectSuggestion>, Vec<String>) = ctx
        .record
        .objects
        .as_ref()
        .map(|o| {
            (
                o.confirmed.iter().map(|i| i.to_suggestion()).collect(),
                o.object_names(),
            )
        })
        .unwrap_or_default();
    let titles = ctx
        .record
        .summary
        .as_ref()
        .map(|s| s.titles())
        .unwrap_or_default();

    let context = EnrichmentContext {
        profession: &profession,
        objects: &objects,
        activities: &activities,
        credential: &credential,
    };

    match enrichment::enrich(service, &context, &titles, settings, refresh).await {
        Ok(result) => {
            let review = EnrichmentReview::new(
                result.review_sample.clone(),
                activities.clone(),
                object_names,
            );
            let pending = ctx
                .enrichment_session
                .insert(PendingEnrichment { result, review });
            Ok(&pending.result)
        }
        Err(err) => {
            ctx.enrichment_session = None;
            Err(err)
        }
    }
}

/// Publish the enrichment run with the reviewed sample and the operator's ratings.
pub fn confirm_enrichment(
    ctx: &mut PipelineContext,
    ratings: QualityRatings,
) -> StageResult<&EnrichmentOutput> {
    let pending = ctx
        .enrichment_session
        .as_ref()
        .ok_or(StageError::NothingToConfirm(Stage::Enrichment))?;

    let output = EnrichmentOutput {
        suggestions: pending.result.all_valid.clone(),
        reviewed_sample: pending.review.records().to_vec(),
        ratings,
    };
    info!(
        "Confirmed enrichment: {} suggestions, {} reviewed, ratings {}/{}",
        output.suggestions.len(),
        output.reviewed_sample.len(),
        ratings.activity,
        ratings.object
    );
    Ok(&*ctx.record.enrichment.insert(output))
}

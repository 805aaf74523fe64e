pub mod curation;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod models;
pub mod oracle;
pub mod pipeline;
pub mod settings;
mod utils;

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use std::{path::PathBuf, sync::Arc};

use error::StageResult;
use models::SessionMode;
use oracle::OpenAiOracle;
use pipeline::StagePipeline;
use settings::{Settings, SettingsStore};

pub use error::{InputValidationError, StageError};

pub const CREDENTIAL_ENV: &str = "OPENAI_API_KEY";
pub const RATINGS_ENV: &str = "ANNOTATOR_RATINGS";
pub const SETTINGS_ENV: &str = "ANNOTATOR_SETTINGS";
pub const DEBUG_ENV: &str = "ANNOTATOR_DEBUG";

/// Headless session: ingest the log named on the command line, accept every
/// suggestion as offered and export whatever was completed.
pub fn run() -> Result<()> {
    let debug_mode = std::env::var(DEBUG_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(if debug_mode {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let mut args = std::env::args().skip(1);
    let log_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: title-annotator <log file> [profession]"))?;
    let profession = args.next();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(run_session(log_path, profession))
}

async fn run_session(log_path: PathBuf, profession: Option<String>) -> Result<()> {
    let settings = match std::env::var_os(SETTINGS_ENV) {
        Some(path) => SettingsStore::new(PathBuf::from(path))?.current(),
        None => Settings::from_env(),
    };

    let oracle = OpenAiOracle::new(&settings.oracle)?;
    let mut pipeline = StagePipeline::new(Arc::new(oracle), settings);

    let text = std::fs::read_to_string(&log_path)
        .with_context(|| format!("Failed to read activity log {}", log_path.display()))?;
    let mode = match profession {
        Some(_) => SessionMode::Generated,
        None => SessionMode::Predefined,
    };
    pipeline.ingest(&text, mode, profession.as_deref())?;

    match std::env::var(CREDENTIAL_ENV) {
        Ok(key) => pipeline.set_credential(&key)?,
        Err(_) => warn!("{CREDENTIAL_ENV} is not set; suggestion stages will be blocked"),
    }

    let ratings = std::env::var(RATINGS_ENV).ok().map(|raw| parse_ratings(&raw)).transpose()?;

    if let Err(err) = accept_all(&mut pipeline, ratings).await {
        error!("Session stopped: {err}");
        if let Some(raw) = err.raw_output() {
            error!("Raw suggestion output:\n{raw}");
        }
    }

    let path = pipeline.export_to(&std::env::current_dir()?)?;
    info!("Results written to {}", path.display());
    Ok(())
}

async fn accept_all(pipeline: &mut StagePipeline, ratings: Option<(u8, u8)>) -> StageResult<()> {
    pipeline.suggest_object_types(false).await?;
    pipeline.confirm_object_types()?;
    pipeline.suggest_activities(false).await?;
    pipeline.confirm_activities()?;
    pipeline.suggest_objects(false).await?;
    pipeline.confirm_objects()?;

    match ratings {
        Some((activity, object)) => {
            pipeline.enrich(false).await?;
            pipeline.confirm_enrichment(activity, object)?;
        }
        None => info!("{RATINGS_ENV} not set; skipping enrichment"),
    }
    Ok(())
}

fn parse_ratings(raw: &str) -> Result<(u8, u8)> {
    let (activity, object) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("{RATINGS_ENV} must look like '<activity>,<object>'"))?;
    let activity = activity.trim().parse().context("Invalid activity rating")?;
    let object = object.trim().parse().context("Invalid object rating")?;
    models::QualityRatings::new(activity, object)?;
    Ok((activity, object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_from_env_text() {
        assert_eq!(parse_ratings(" 4, 2").unwrap(), (4, 2));
        assert!(parse_ratings("4").is_err());
        assert!(parse_ratings("0,3").is_err());
    }
}

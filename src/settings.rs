use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::ingestion::AggregationConfig;

pub const SEED_ENV: &str = "ANNOTATOR_SEED";
pub const MODEL_ENV: &str = "ANNOTATOR_MODEL";
pub const ENDPOINT_ENV: &str = "ANNOTATOR_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OracleSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// No timeout unless configured.
    pub timeout_secs: Option<u64>,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".into(),
            model: "gpt-4.1".into(),
            temperature: 0.7,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrichmentSettings {
    /// Titles per suggestion call.
    pub batch_size: usize,
    /// Upper bound on titles sent for enrichment.
    pub sample_cap: usize,
    /// Valid records shown to the operator for review.
    pub review_sample_size: usize,
    /// Fixed seed for reproducible sampling; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            sample_cap: 100,
            review_sample_size: 10,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub oracle: OracleSettings,
    pub aggregation: AggregationConfig,
    pub enrichment: EnrichmentSettings,
}

impl Settings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env();
        settings
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.enrichment.seed = Some(seed),
                Err(_) => warn!("Ignoring {SEED_ENV}={raw:?}: not an unsigned integer"),
            }
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.oracle.model = model.trim().to_string();
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.oracle.endpoint = endpoint.trim().to_string();
        }
    }
}

/// Settings backed by a JSON file; edits are persisted immediately.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<Settings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let mut data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(
                    "Settings at {} are malformed ({err}); using defaults",
                    path.display()
                );
                Settings::default()
            })
        } else {
            Settings::default()
        };
        data.apply_env();

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current(&self) -> Settings {
        self.read().clone()
    }

    pub fn update_enrichment(&self, enrichment: EnrichmentSettings) -> Result<()> {
        let mut guard = self.write();
        guard.enrichment = enrichment;
        self.persist(&guard)
    }

    fn persist(&self, data: &Settings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

//! Error taxonomy reported at stage boundaries.
//!
//! Nothing here aborts the session: every variant is surfaced to the
//! operator, who decides whether to re-trigger the action.

use thiserror::Error;

use crate::oracle::OracleError;
use crate::pipeline::{Requirement, Stage};

/// Problems with caller-supplied input (log table, credential, ratings).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputValidationError {
    #[error("uploaded log is empty")]
    Empty,

    #[error("uploaded log is missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' has unparseable timestamp '{value}'")]
    Timestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: '{title}' ends before it begins")]
    NegativeDuration { row: usize, title: String },

    #[error("row {row}: expected {expected} fields, found {found}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("profession must not be empty")]
    MissingProfession,

    #[error("invalid API key format: {0}")]
    Credential(String),

    #[error("{name} rating must be between 1 and 5, got {value}")]
    Rating { name: &'static str, value: u8 },
}

/// Outcome of a failed stage action.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    InputValidation(#[from] InputValidationError),

    #[error("{stage} is blocked until {} provided", requirement_phrase(.missing))]
    StatePrecondition {
        stage: Stage,
        missing: Vec<Requirement>,
    },

    #[error("suggestion service failed: {0}")]
    ExternalService(#[from] OracleError),

    #[error("failed to parse suggestion output: {reason}")]
    SuggestionFormat { reason: String, raw: String },

    #[error("no title was associated with both activities and objects ({batches} batches, {failed_batches} failed)")]
    NoEnrichmentFound {
        batches: usize,
        failed_batches: usize,
    },

    #[error("edit rejected: {0}")]
    InvalidEdit(String),

    #[error("{0} has no working set to confirm")]
    NothingToConfirm(Stage),
}

impl StageError {
    /// Precondition failures are warnings; the operator just finishes the earlier stage.
    pub fn is_warning(&self) -> bool {
        matches!(self, StageError::StatePrecondition { .. })
    }

    /// Raw oracle output worth showing for diagnosis, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            StageError::SuggestionFormat { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }
}

fn requirement_phrase(missing: &[Requirement]) -> String {
    let listed = missing
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let verb = if missing.len() == 1 { "is" } else { "are" };
    format!("{listed} {verb}")
}

pub type StageResult<T> = Result<T, StageError>;

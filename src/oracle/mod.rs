//! Contract with the external suggestion service.
//!
//! The core only sees [`SuggestionOracle`]: role-tagged messages in, raw
//! text out. Everything between (prompt wording, fence stripping, shape
//! validation, memoization) lives in this module.

pub mod cache;
pub mod credential;
pub mod openai;
pub mod parse;
pub mod prompts;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::ObjectSuggestion;

pub use cache::SuggestionCache;
pub use credential::Credential;
pub use openai::OpenAiOracle;
pub use parse::FormatError;
pub use service::SuggestionService;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OracleMessage {
    pub role: Role,
    pub content: String,
}

impl OracleMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A fully rendered call: instructions plus the caller's credential.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub messages: Vec<OracleMessage>,
    pub credential: Credential,
}

/// Transport-level failure of a suggestion call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OracleError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response envelope: {0}")]
    Response(String),
}

#[async_trait]
pub trait SuggestionOracle: Send + Sync {
    /// Run one completion and return the raw text of the answer.
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError>;
}

/// Structured context of a suggestion call, one variant per stage.
///
/// Its canonical JSON form is what the suggestion cache is keyed on.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum SuggestionRequest {
    ObjectTypes {
        profession: String,
    },
    Activities {
        profession: String,
        object_types: Vec<String>,
    },
    Objects {
        profession: String,
        object_types: Vec<String>,
        activities: Vec<String>,
        titles: Vec<String>,
    },
    Enrichment {
        profession: String,
        objects: Vec<ObjectSuggestion>,
        activities: Vec<String>,
        titles: Vec<String>,
    },
}

impl SuggestionRequest {
    pub fn stage_name(&self) -> &'static str {
        match self {
            SuggestionRequest::ObjectTypes { .. } => "object_types",
            SuggestionRequest::Activities { .. } => "activities",
            SuggestionRequest::Objects { .. } => "objects",
            SuggestionRequest::Enrichment { .. } => "enrichment",
        }
    }

    /// Hex SHA-256 of the canonical JSON encoding (stage tag + inputs).
    pub fn cache_key(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"));
        format!("{:x}", Sha256::digest(canonical.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_depends_on_stage_and_inputs() {
        let types = SuggestionRequest::ObjectTypes {
            profession: "recruiter".into(),
        };
        let same = SuggestionRequest::ObjectTypes {
            profession: "recruiter".into(),
        };
        let other = SuggestionRequest::ObjectTypes {
            profession: "nurse".into(),
        };
        let activities = SuggestionRequest::Activities {
            profession: "recruiter".into(),
            object_types: vec![],
        };

        assert_eq!(types.cache_key(), same.cache_key());
        assert_ne!(types.cache_key(), other.cache_key());
        assert_ne!(types.cache_key(), activities.cache_key());
        assert_eq!(types.cache_key().len(), 64);
    }
}

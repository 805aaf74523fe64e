//! In-process oracle double for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{OracleError, OracleRequest, SuggestionOracle};

type Responder = dyn Fn(usize, &OracleRequest) -> Result<String, OracleError> + Send + Sync;

/// Answers each call through a closure that sees the zero-based call index
/// and the rendered request. Every request is recorded.
pub(crate) struct ScriptedOracle {
    responder: Box<Responder>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &OracleRequest) -> Result<String, OracleError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same text.
    pub(crate) fn fixed(answer: &str) -> Self {
        let answer = answer.to_string();
        Self::new(move |_, _| Ok(answer.clone()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionOracle for ScriptedOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        (self.responder)(index, request)
    }
}

/// The last line of the user prompt is `Titles: [...]`; pull the batch back out.
pub(crate) fn batch_titles(request: &OracleRequest) -> Vec<String> {
    request
        .messages
        .last()
        .and_then(|message| message.content.lines().last())
        .and_then(|line| line.strip_prefix("Titles: "))
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default()
}

pub(crate) fn credential() -> super::Credential {
    super::Credential::parse("sk-test-0123456789abcdefghijklmnopqrstuvwxyz").unwrap()
}

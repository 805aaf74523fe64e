#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use title_annotator_lib::oracle::{OracleError, OracleRequest, SuggestionOracle};
use title_annotator_lib::pipeline::StagePipeline;
use title_annotator_lib::settings::Settings;

pub const API_KEY: &str = "sk-integration-0123456789abcdefghijklmnopqrstu";

/// Which suggestion a request is asking for, read off the rendered user prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asked {
    ObjectTypes,
    Activities,
    Objects,
    Enrichment,
}

pub fn asked(request: &OracleRequest) -> Asked {
    let user = &request.messages[request.messages.len() - 1].content;
    if user.contains("Objects and Types:") {
        Asked::Enrichment
    } else if user.contains("Window Titles:") {
        Asked::Objects
    } else if user.contains("Object Types:") {
        Asked::Activities
    } else {
        Asked::ObjectTypes
    }
}

pub fn batch_titles(request: &OracleRequest) -> Vec<String> {
    request.messages[request.messages.len() - 1]
        .content
        .lines()
        .last()
        .and_then(|line| line.strip_prefix("Titles: "))
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default()
}

type Responder = dyn Fn(Asked, &OracleRequest) -> Result<String, OracleError> + Send + Sync;

pub struct FakeOracle {
    responder: Box<Responder>,
    seen: Mutex<Vec<Asked>>,
}

impl FakeOracle {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(Asked, &OracleRequest) -> Result<String, OracleError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Plausible answers for an academic advisor's log.
    pub fn advisor() -> Arc<Self> {
        Self::new(|asked, request| Ok(advisor_answer(asked, request)))
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn calls_for(&self, stage: Asked) -> usize {
        self.seen.lock().unwrap().iter().filter(|s| **s == stage).count()
    }
}

#[async_trait]
impl SuggestionOracle for FakeOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let stage = asked(request);
        self.seen.lock().unwrap().push(stage);
        (self.responder)(stage, request)
    }
}

pub fn advisor_answer(asked: Asked, request: &OracleRequest) -> String {
    match asked {
        Asked::ObjectTypes => {
            "```json\n[\"students\", \"theses\", \"emails\", \"courses\"]\n```".to_string()
        }
        Asked::Activities => json!([
            "read and respond to email",
            "supervise students",
            "prepare lectures"
        ])
        .to_string(),
        Asked::Objects => json!([
            {"object": "jane doe thesis", "object_type": "theses"},
            {"object": "jane doe", "object_type": "students"},
            {"object": "lecture 5", "object_type": "lectures"}
        ])
        .to_string(),
        Asked::Enrichment => {
            let records: Vec<serde_json::Value> = batch_titles(request)
                .into_iter()
                .map(|title| {
                    if title.starts_with("Inbox") {
                        json!({"title": title, "activities": ["read and respond to email"], "objects": []})
                    } else {
                        json!({
                            "title": title,
                            "activities": ["supervise students"],
                            "objects": ["jane doe thesis"]
                        })
                    }
                })
                .collect();
            serde_json::to_string(&records).unwrap()
        }
    }
}

/// Three titles survive the distinct-day filter; the single-day report does not.
pub fn advisor_log() -> String {
    [
        "Title;Begin;End;Type",
        "Inbox - Outlook;2024-03-04 09:00:00;2024-03-04 09:02:00;AppTrackItem",
        "Inbox - Outlook;2024-03-05 09:00:00;2024-03-05 09:02:00;AppTrackItem",
        "Inbox - Outlook;2024-03-06 09:00:00;2024-03-06 09:02:00;AppTrackItem",
        "Thesis Jane Doe.docx - Word;2024-03-04 10:00:00;2024-03-04 10:10:00;AppTrackItem",
        "Thesis Jane Doe.docx - Word;2024-03-06 10:00:00;2024-03-06 10:10:00;AppTrackItem",
        "Lecture 5 - PowerPoint;2024-03-04 13:00:00;2024-03-04 13:05:00;AppTrackItem",
        "Lecture 5 - PowerPoint;2024-03-05 13:00:00;2024-03-05 13:05:00;AppTrackItem",
        "Report.docx - Word;2024-03-05 15:00:00;2024-03-05 16:00:00;AppTrackItem",
    ]
    .join("\n")
}

pub fn pipeline(oracle: Arc<FakeOracle>) -> StagePipeline {
    let mut settings = Settings::default();
    settings.enrichment.seed = Some(11);
    StagePipeline::new(oracle, settings)
}

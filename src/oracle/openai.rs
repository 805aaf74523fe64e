use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::settings::OracleSettings;

use super::{OracleError, OracleMessage, OracleRequest, SuggestionOracle};

/// Chat-completions client for the hosted suggestion service.
pub struct OpenAiOracle {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [OracleMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiOracle {
    pub fn new(settings: &OracleSettings) -> Result<Self, OracleError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| OracleError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl SuggestionOracle for OpenAiOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(self.url())
            .bearer_auth(request.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Response(e.to_string()))?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleError::Response("no message content in first choice".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_normalised() {
        let settings = OracleSettings {
            endpoint: "https://api.openai.com/v1/".into(),
            ..OracleSettings::default()
        };
        let oracle = OpenAiOracle::new(&settings).unwrap();
        assert_eq!(oracle.url(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(oracle.model, "gpt-4.1");
    }

    #[test]
    fn request_body_shape() {
        let messages = vec![OracleMessage::system("s"), OracleMessage::user("u")];
        let body = ChatRequest {
            model: "gpt-4.1",
            messages: &messages,
            temperature: 0.5,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "u");
        assert_eq!(value["temperature"], 0.5);
    }
}

//! Ollama client for narrative flavor text
//!
//! Talks to the OpenAI-compatible `/chat/completions` endpoint, so any
//! server exposing that API works as well.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::NarrativePort;
use crate::domain::entities::ChallengeOutcome;
use crate::domain::value_objects::ChallengeTheme;

const SYSTEM_PROMPT: &str = "You are the narrator of a tabletop roleplaying game. \
Reply with two or three vivid sentences of prose and nothing else.";

/// Client for the Ollama chat API
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Send one system+user exchange and return the first reply
    pub async fn complete(&self, prompt: &str) -> Result<String, OllamaError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT),
                ChatMessage::new("user", prompt),
            ],
            temperature: 0.8,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(OllamaError::ApiError(error_text));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion.into_text()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Model returned no text")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Result<String, OllamaError> {
        self.choices
            .into_iter()
            .map(|choice| choice.message.content.trim().to_string())
            .find(|text| !text.is_empty())
            .ok_or(OllamaError::EmptyResponse)
    }
}

fn opening_prompt(theme: ChallengeTheme, name: &str) -> String {
    format!(
        "Set the scene for a {} skill challenge called \"{}\".",
        theme.display_name().to_lowercase(),
        name
    )
}

fn conclusion_prompt(theme: ChallengeTheme, outcome: ChallengeOutcome, successes: u32, failures: u32) -> String {
    format!(
        "Describe how a {} skill challenge ends. Result: {}. The party earned {} successes and {} failures.",
        theme.display_name().to_lowercase(),
        outcome.display_name().to_lowercase(),
        successes,
        failures
    )
}

#[async_trait]
impl NarrativePort for OllamaClient {
    async fn opening(&self, theme: ChallengeTheme, name: &str) -> Result<String> {
        Ok(self.complete(&opening_prompt(theme, name)).await?)
    }

    async fn conclusion(
        &self,
        theme: ChallengeTheme,
        outcome: ChallengeOutcome,
        successes: u32,
        failures: u32,
    ) -> Result<String> {
        Ok(self
            .complete(&conclusion_prompt(theme, outcome, successes, failures))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let client = OllamaClient::new("http://localhost:11434/v1/", "llama3.2");
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: "llama3.2".to_string(),
            messages: vec![ChatMessage::new("user", "hi")],
            temperature: 0.5,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_text_skips_blank_choices() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  " } },
                { "message": { "role": "assistant", "content": " The gates creak open. " } }
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "The gates creak open.");

        let empty: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(matches!(empty.into_text(), Err(OllamaError::EmptyResponse)));
    }

    #[test]
    fn test_prompts_mention_theme_and_tally() {
        assert!(opening_prompt(ChallengeTheme::Survival, "The Long Winter").contains("\"The Long Winter\""));
        let prompt = conclusion_prompt(ChallengeTheme::Chase, ChallengeOutcome::Timeout, 2, 1);
        assert!(prompt.contains("chase"));
        assert!(prompt.contains("out of time"));
        assert!(prompt.contains("2 successes and 1 failures"));
    }
}

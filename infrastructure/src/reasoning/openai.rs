//! OpenAI chat-completions adapter

use super::{ReasoningSettings, ReasoningSetupError, map_transport_error, read_failure};
use async_trait::async_trait;
use council_application::{ReasoningError, ReasoningService};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Reasoning service backed by an OpenAI-compatible endpoint
pub struct OpenAiReasoning {
    settings: ReasoningSettings,
    http: reqwest::Client,
}

impl OpenAiReasoning {
    pub fn new(settings: ReasoningSettings) -> Result<Self, ReasoningSetupError> {
        let http = settings.http_client()?;
        Ok(Self { settings, http })
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
        }
    }
}

/// Pull the first choice's text out of a chat-completions body
fn extract_completion(body: &str) -> Result<String, ReasoningError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ReasoningError::InvalidResponse(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ReasoningError::EmptyResponse)
}

#[async_trait]
impl ReasoningService for OpenAiReasoning {
    fn engine(&self) -> &str {
        "openai"
    }

    async fn reason(&self, prompt: &str) -> Result<String, ReasoningError> {
        let url = format!("{}/chat/completions", self.settings.base_url);
        debug!("POST {} (model {})", url, self.settings.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let text = extract_completion(&body)?;
        debug!("OpenAI response received: {} chars", text.len());
        Ok(text)
    }
}

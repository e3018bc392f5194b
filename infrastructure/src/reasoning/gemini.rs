//! Gemini generateContent adapter

use super::{ReasoningSettings, ReasoningSetupError, map_transport_error, read_failure};
use async_trait::async_trait;
use council_application::{ReasoningError, ReasoningService};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Reasoning service backed by the Gemini API
pub struct GeminiReasoning {
    settings: ReasoningSettings,
    http: reqwest::Client,
}

impl GeminiReasoning {
    pub fn new(settings: ReasoningSettings) -> Result<Self, ReasoningSetupError> {
        let http = settings.http_client()?;
        Ok(Self { settings, http })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
            },
        }
    }
}

/// Concatenate the text parts of the first candidate
fn extract_completion(body: &str) -> Result<String, ReasoningError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ReasoningError::InvalidResponse(e.to_string()))?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ReasoningError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[async_trait]
impl ReasoningService for GeminiReasoning {
    fn engine(&self) -> &str {
        "gemini"
    }

    async fn reason(&self, prompt: &str) -> Result<String, ReasoningError> {
        let url = self.endpoint();
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let text = extract_completion(&body)?;
        debug!("Gemini response received: {} chars", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::EngineKind;
    use std::time::Duration;

    fn service() -> GeminiReasoning {
        GeminiReasoning::new(ReasoningSettings {
            engine: EngineKind::Gemini,
            model: "gemini-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: "g-test".to_string(),
            timeout: Duration::from_secs(5),
            temperature: 0.0,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            service().endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let service = service();
        let body = serde_json::to_value(service.request_body("decide")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "decide");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
    }

    #[test]
    fn test_extract_completion_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"action\":"},{"text":"\"REITERATE\"}"}]}}]}"#;
        assert_eq!(
            extract_completion(body).unwrap(),
            r#"{"action":"REITERATE"}"#
        );
    }

    #[test]
    fn test_extract_completion_blocked() {
        // Safety-blocked prompts come back without content
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        assert!(matches!(
            extract_completion(body),
            Err(ReasoningError::EmptyResponse)
        ));
    }
}

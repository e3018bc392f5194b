//! Reasoning engine adapters
//!
//! HTTP clients implementing [`ReasoningService`] for the supported engines,
//! plus the factory that turns the `[reasoning]` config section into one.
//!
//! Setup is strict: an unknown engine or a missing API key is a fatal
//! [`ReasoningSetupError`]. Failures of individual calls are returned as
//! [`ReasoningError`](council_application::ReasoningError) and handled by
//! the council loop.

mod gemini;
mod openai;

pub use gemini::GeminiReasoning;
pub use openai::OpenAiReasoning;

use crate::config::FileReasoningConfig;
use council_application::{ReasoningError, ReasoningService};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Supported engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    OpenAi,
    Gemini,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::OpenAi, EngineKind::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::OpenAi => "openai",
            EngineKind::Gemini => "gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            EngineKind::OpenAi => "gpt-4",
            EngineKind::Gemini => "gemini-pro",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            EngineKind::OpenAi => "OPENAI_API_KEY",
            EngineKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            EngineKind::OpenAi => "https://api.openai.com/v1",
            EngineKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(EngineKind::OpenAi),
            "gemini" => Ok(EngineKind::Gemini),
            _ => Err(format!("Unknown engine: {}. Valid: openai, gemini", s)),
        }
    }
}

/// Fatal reasoning setup errors
#[derive(Error, Debug)]
pub enum ReasoningSetupError {
    #[error("Unknown reasoning engine '{0}' (valid: openai, gemini)")]
    UnknownEngine(String),

    #[error("{engine} engine selected but {env_var} is not set")]
    MissingApiKey { engine: EngineKind, env_var: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Resolved connection settings shared by the HTTP adapters
#[derive(Debug, Clone)]
pub struct ReasoningSettings {
    pub engine: EngineKind,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub temperature: f64,
}

impl ReasoningSettings {
    /// Resolve settings for `engine`, reading the API key through `lookup`.
    ///
    /// A key set directly in the config wins over the environment.
    pub fn resolve(
        engine: EngineKind,
        config: &FileReasoningConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ReasoningSetupError> {
        let env_var = config
            .api_key_env
            .clone()
            .unwrap_or_else(|| engine.default_api_key_env().to_string());

        let api_key = config
            .api_key
            .clone()
            .or_else(|| lookup(&env_var))
            .filter(|key| !key.trim().is_empty())
            .ok_or(ReasoningSetupError::MissingApiKey { engine, env_var })?;

        Ok(Self {
            engine,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| engine.default_model().to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| engine.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs),
            temperature: config.temperature,
        })
    }

    fn http_client(&self) -> Result<reqwest::Client, ReasoningSetupError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ReasoningSetupError::Client(e.to_string()))
    }
}

/// Build the configured reasoning service, or `None` when no engine is set.
pub fn build_reasoning_service(
    config: &FileReasoningConfig,
) -> Result<Option<Arc<dyn ReasoningService>>, ReasoningSetupError> {
    build_with_lookup(config, |name| std::env::var(name).ok())
}

fn build_with_lookup(
    config: &FileReasoningConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<Arc<dyn ReasoningService>>, ReasoningSetupError> {
    let raw = config.engine.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let engine = raw
        .parse::<EngineKind>()
        .map_err(|_| ReasoningSetupError::UnknownEngine(raw.to_string()))?;

    let settings = ReasoningSettings::resolve(engine, config, lookup)?;
    info!(
        "Reasoning engine: {} (model {}, timeout {}s)",
        engine,
        settings.model,
        settings.timeout.as_secs()
    );

    let service: Arc<dyn ReasoningService> = match engine {
        EngineKind::OpenAi => Arc::new(OpenAiReasoning::new(settings)?),
        EngineKind::Gemini => Arc::new(GeminiReasoning::new(settings)?),
    };
    Ok(Some(service))
}

/// Map transport failures onto the port's error type
fn map_transport_error(error: reqwest::Error) -> ReasoningError {
    if error.is_timeout() {
        ReasoningError::Timeout
    } else if error.is_connect() {
        ReasoningError::ConnectionError(error.to_string())
    } else {
        ReasoningError::RequestFailed(error.to_string())
    }
}

/// Turn a non-success HTTP response into a request failure
async fn read_failure(response: reqwest::Response) -> ReasoningError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ReasoningError::RequestFailed(format!(
        "HTTP {} {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        body.chars().take(500).collect::<String>()
    ))
}

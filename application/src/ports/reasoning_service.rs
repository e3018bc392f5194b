//! Reasoning service port
//!
//! Defines the interface for the external reasoning engine used by the
//! reasoning consensus strategy and the modification synthesizer. The port
//! deals in raw completion text; parsing lives in the domain.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling the reasoning service
#[derive(Error, Debug, Clone)]
pub enum ReasoningError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Unexpected response format: {0}")]
    InvalidResponse(String),
}

/// External reasoning engine
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Engine identifier for logs and audit records (e.g. "openai")
    fn engine(&self) -> &str;

    /// Send one prompt and return the completion text
    async fn reason(&self, prompt: &str) -> Result<String, ReasoningError>;
}

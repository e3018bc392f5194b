//! Council agent port
//!
//! Defines the boundary every evaluator agent sits behind. Agents are opaque:
//! the council hands them a projected [`AgentInput`] and receives an
//! untrusted [`AgentSubmission`] back.

use async_trait::async_trait;
use council_domain::{AgentInput, AgentSubmission};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors an agent may report instead of a submission
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("Agent failed: {0}")]
    Failed(String),

    #[error("Agent timed out after {0}s")]
    Timeout(u64),

    #[error("Agent returned unreadable output: {0}")]
    MalformedOutput(String),

    #[error("Agent could not be started: {0}")]
    Spawn(String),
}

/// An evaluator occupying one council slot
///
/// Implementations live in the infrastructure layer (subprocess agents) or
/// are supplied directly by library users.
#[async_trait]
pub trait CouncilAgent: Send + Sync {
    /// Evaluate the proposed investment from this agent's point of view
    async fn evaluate(&self, input: AgentInput) -> Result<AgentSubmission, AgentError>;
}

type BoxedEvaluation = Pin<Box<dyn Future<Output = Result<AgentSubmission, AgentError>> + Send>>;

/// Adapter turning an async closure into a [`CouncilAgent`]
pub struct FnAgent {
    func: Box<dyn Fn(AgentInput) -> BoxedEvaluation + Send + Sync>,
}

impl FnAgent {
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn(AgentInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<AgentSubmission, AgentError>> + Send + 'static,
    {
        Self {
            func: Box::new(move |input| Box::pin(func(input))),
        }
    }
}

#[async_trait]
impl CouncilAgent for FnAgent {
    async fn evaluate(&self, input: AgentInput) -> Result<AgentSubmission, AgentError> {
        (self.func)(input).await
    }
}

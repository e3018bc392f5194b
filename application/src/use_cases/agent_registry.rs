//! Agent registry and invoker
//!
//! The registry maps council slots to agents and is frozen once handed to
//! the use case. [`invoke_agents`] runs every registered agent against an
//! immutable snapshot of the state and returns one [`AgentOutcome`] per slot
//! in slot order, whatever order the agents finished in.

use crate::ports::council_agent::CouncilAgent;
use council_domain::council::project;
use council_domain::{
    AgentOutput, AgentSlot, CouncilState, InputManifest, OutputViolation, validate_submission,
};
use futures::FutureExt;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

/// Slot → agent map
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentSlot, Arc<dyn CouncilAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent; a later registration under the same slot wins
    pub fn register(&mut self, slot: AgentSlot, agent: Arc<dyn CouncilAgent>) {
        if self.agents.insert(slot, agent).is_some() {
            debug!("Replacing agent registered under {}", slot);
        }
    }

    pub fn with_agent(mut self, slot: AgentSlot, agent: Arc<dyn CouncilAgent>) -> Self {
        self.register(slot, agent);
        self
    }

    pub fn get(&self, slot: AgentSlot) -> Option<&Arc<dyn CouncilAgent>> {
        self.agents.get(&slot)
    }

    /// Registered slots in invocation order
    pub fn slots(&self) -> Vec<AgentSlot> {
        self.agents.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("slots", &self.slots())
            .finish()
    }
}

/// What one agent produced this round
#[derive(Debug, Clone)]
pub enum AgentOutcome {
    Accepted(AgentOutput),
    Invalid(Vec<OutputViolation>),
    Failed(String),
}

impl AgentOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AgentOutcome::Accepted(_))
    }
}

/// Invoke every registered agent against `snapshot`.
///
/// Errors, panics and invalid submissions are turned into outcomes; this
/// function never fails.
pub async fn invoke_agents(
    registry: &AgentRegistry,
    manifest: &InputManifest,
    snapshot: &CouncilState,
    parallel: bool,
) -> Vec<(AgentSlot, AgentOutcome)> {
    let mut prepared = Vec::with_capacity(registry.len());
    for (slot, agent) in &registry.agents {
        let input = project(snapshot, *slot, manifest.fields_for(*slot));
        if !input.missing.is_empty() {
            warn!(
                "{}: declared inputs not available: {}",
                slot,
                input
                    .missing
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        debug!("Invoking {} (iteration {})", slot, snapshot.iteration());
        prepared.push((*slot, Arc::clone(agent), input));
    }

    let mut outcomes = Vec::with_capacity(prepared.len());

    if parallel {
        let handles: Vec<_> = prepared
            .into_iter()
            .map(|(slot, agent, input)| {
                let handle = tokio::spawn(async move { agent.evaluate(input).await });
                (slot, handle)
            })
            .collect();

        // Await in slot order so outcomes are applied deterministically
        for (slot, handle) in handles {
            let outcome = match handle.await {
                Ok(Ok(submission)) => classify(validate_submission(submission)),
                Ok(Err(e)) => AgentOutcome::Failed(e.to_string()),
                Err(join_error) if join_error.is_panic() => {
                    AgentOutcome::Failed(format!("agent panicked: {}", panic_message(join_error.into_panic())))
                }
                Err(join_error) => AgentOutcome::Failed(format!("agent task aborted: {}", join_error)),
            };
            outcomes.push((slot, outcome));
        }
    } else {
        for (slot, agent, input) in prepared {
            let outcome = match AssertUnwindSafe(agent.evaluate(input)).catch_unwind().await {
                Ok(Ok(submission)) => classify(validate_submission(submission)),
                Ok(Err(e)) => AgentOutcome::Failed(e.to_string()),
                Err(payload) => {
                    AgentOutcome::Failed(format!("agent panicked: {}", panic_message(payload)))
                }
            };
            outcomes.push((slot, outcome));
        }
    }

    outcomes
}

fn classify(result: Result<AgentOutput, Vec<OutputViolation>>) -> AgentOutcome {
    match result {
        Ok(output) => AgentOutcome::Accepted(output),
        Err(violations) => AgentOutcome::Invalid(violations),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

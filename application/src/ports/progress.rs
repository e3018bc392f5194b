//! Progress notification port
//!
//! Defines the interface for reporting progress during a council run.

use council_domain::{AgentSlot, EvaluationResult};

/// Callback for progress updates during a council run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait CouncilProgress: Send + Sync {
    /// Called when an iteration starts, with the number of agents to invoke
    fn on_iteration_start(&self, iteration: u32, max_iterations: u32, agents: usize);

    /// Called when an agent finishes; `accepted` is false for invalid or failed runs
    fn on_agent_complete(&self, slot: AgentSlot, accepted: bool);

    /// Called after the iteration's decision is made
    fn on_evaluation(&self, iteration: u32, result: &EvaluationResult);

    /// Called once the state is sealed
    fn on_terminated(&self, _result: &EvaluationResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CouncilProgress for NoProgress {
    fn on_iteration_start(&self, _iteration: u32, _max_iterations: u32, _agents: usize) {}
    fn on_agent_complete(&self, _slot: AgentSlot, _accepted: bool) {}
    fn on_evaluation(&self, _iteration: u32, _result: &EvaluationResult) {}
}

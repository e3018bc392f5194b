//! Application layer for investment-council
//!
//! This crate contains the council use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{ConsensusStrategy, CouncilParams};
pub use ports::{
    council_agent::{AgentError, CouncilAgent, FnAgent},
    council_logger::{CouncilEvent, CouncilLogger, NoCouncilLogger},
    data_source::{CouncilDataSource, DataSourceError},
    progress::{CouncilProgress, NoProgress},
    reasoning_service::{ReasoningError, ReasoningService},
};
pub use use_cases::agent_registry::{AgentOutcome, AgentRegistry, invoke_agents};
pub use use_cases::evaluate_consensus::{
    ConsensusEvaluator, EvaluationOutcome, ReasoningEvaluator, RulesEvaluator, select_evaluator,
};
pub use use_cases::run_council::{
    CouncilRequest, RunCouncilError, RunCouncilOutput, RunCouncilUseCase,
};
pub use use_cases::synthesize_modifications::ModificationSynthesizer;

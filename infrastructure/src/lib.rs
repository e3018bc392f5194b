//! Infrastructure layer for investment-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration loading, reasoning engine clients,
//! subprocess agents, data sources and the JSONL audit trail.

pub mod agents;
pub mod config;
pub mod data;
pub mod logging;
pub mod reasoning;

// Re-export commonly used types
pub use agents::{CommandAgent, command_registry};
pub use config::{
    AgentCommandSpec, ConfigLoader, FileAgentCommand, FileAgentsConfig, FileConfig,
    FileCouncilConfig, FileDataConfig, FileLoggingConfig, FileReasoningConfig,
};
pub use data::{InMemoryDataSource, JsonDocumentStore};
pub use logging::JsonlCouncilLogger;
pub use reasoning::{
    EngineKind, GeminiReasoning, OpenAiReasoning, ReasoningSettings, ReasoningSetupError,
    build_reasoning_service,
};

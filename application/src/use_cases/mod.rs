//! Use cases (application services)

pub mod agent_registry;
pub mod evaluate_consensus;
pub mod run_council;
pub mod synthesize_modifications;

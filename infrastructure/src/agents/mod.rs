//! Agent adapters

mod command;

pub use command::CommandAgent;

use crate::config::AgentCommandSpec;
use council_application::AgentRegistry;
use std::sync::Arc;
use tracing::info;

/// Register one subprocess agent per configured slot
pub fn command_registry(specs: &[AgentCommandSpec]) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    for spec in specs {
        info!("Registering {} -> {}", spec.slot, spec.program);
        registry.register(spec.slot, Arc::new(CommandAgent::from_spec(spec)));
    }
    registry
}

//! Port definitions (interfaces for external adapters)

pub mod council_agent;
pub mod council_logger;
pub mod data_source;
pub mod progress;
pub mod reasoning_service;

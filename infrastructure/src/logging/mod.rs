//! Logging infrastructure: council audit trail.
//!
//! Provides [`JsonlCouncilLogger`], a JSONL file writer that implements
//! the [`CouncilLogger`](council_application::CouncilLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlCouncilLogger;

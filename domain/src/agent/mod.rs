//! Agent contracts
//!
//! Slots, the output record agents return, its validator, and the manifests
//! that decide what each agent may read.

pub mod manifest;
pub mod output;
pub mod slot;
pub mod validation;

pub use manifest::{InputField, InputManifest};
pub use output::{AgentOutput, AgentSubmission, Verdict};
pub use slot::AgentSlot;
pub use validation::{OutputViolation, is_valid, validate_submission};

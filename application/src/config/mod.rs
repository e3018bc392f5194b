//! Application-level configuration.
//!
//! - [`CouncilParams`]: orchestration loop control (iterations, threshold, strategy, manifest)

pub mod council_params;

pub use council_params::{ConsensusStrategy, CouncilParams};

//! Council orchestration model
//!
//! The state machine record, input projection, the deterministic rule
//! cascade, decisions and their evidence, modification requests, service
//! response parsing and the final recommendation. Everything here is pure;
//! the loop that drives it lives in the application layer.

pub mod evaluation;
pub mod modification;
pub mod parsing;
pub mod projection;
pub mod recommendation;
pub mod rules;
pub mod state;

pub use evaluation::{CouncilAction, EvaluationDetails, EvaluationResult, ReasonCode};
pub use modification::{ModificationContext, ModificationRequest, collect_modification_requests};
pub use parsing::{
    ResponseParseError, ServiceVerdict, extract_json_object, parse_service_verdict,
    parse_structured_response,
};
pub use projection::{AgentInput, project};
pub use recommendation::FinalRecommendation;
pub use rules::{ConsensusRules, DEFAULT_CONFIDENCE_THRESHOLD, mean_confidence, no_outputs};
pub use state::{CouncilInputs, CouncilPhase, CouncilState, IterationRecord};

//! Domain layer for investment-council
//!
//! This crate contains the council's data contracts, its state machine and
//! the pure decision logic. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed set of agent slots each render a [`Verdict`] on one proposed
//! investment. Round after round the council decides whether the group has
//! reached consensus ([`CouncilAction::Terminate`]), needs another round
//! ([`CouncilAction::Reiterate`]), or has run out of iterations.
//!
//! ## Projection and validation
//!
//! Agents read a projected [`AgentInput`] limited to their declared fields
//! and return an untrusted [`AgentSubmission`] that must pass
//! [`validate_submission`] before it is stored.

pub mod agent;
pub mod config;
pub mod core;
pub mod council;
pub mod investment;
pub mod prompt;

// Re-export commonly used types
pub use agent::{
    AgentOutput, AgentSlot, AgentSubmission, InputField, InputManifest, OutputViolation, Verdict,
    is_valid, validate_submission,
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::DomainError;
pub use council::{
    AgentInput, ConsensusRules, CouncilAction, CouncilInputs, CouncilPhase, CouncilState,
    EvaluationDetails, EvaluationResult, FinalRecommendation, IterationRecord,
    ModificationContext, ModificationRequest, ReasonCode, ServiceVerdict,
};
pub use investment::{
    AssetCandidate, AssetType, FinancialGoal, Holding, LiquidityClass, MarketContext,
    MarketTrend, Position, RateRegime, RiskLevel, UserProfile,
};
pub use prompt::CouncilPromptTemplate;

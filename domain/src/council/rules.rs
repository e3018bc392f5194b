//! Deterministic consensus rules
//!
//! The cascade short-circuits on the first matching rule:
//!
//! | Order | Condition | Result |
//! |-------|-----------|--------|
//! | 1 | no outputs | REITERATE `NO_OUTPUTS` |
//! | 2 | any REJECT | REITERATE `REJECT` |
//! | 3 | any blocking issue | REITERATE `BLOCKING_ISSUES` |
//! | 4 | mean confidence < threshold | REITERATE `LOW_CONFIDENCE` |
//! | 5 | otherwise | TERMINATE `CONSENSUS` |
//!
//! # Example
//!
//! ```
//! use council_domain::agent::{AgentOutput, AgentSlot, Verdict};
//! use council_domain::council::{ConsensusRules, ReasonCode};
//! use std::collections::BTreeMap;
//!
//! let mut outputs = BTreeMap::new();
//! outputs.insert(AgentSlot::RiskQualification, AgentOutput::new("risk", Verdict::Approve, 0.9));
//! outputs.insert(AgentSlot::MarketAnalysis, AgentOutput::new("market", Verdict::Approve, 0.5));
//!
//! let result = ConsensusRules::default().evaluate(&outputs);
//! assert_eq!(result.reason, ReasonCode::LowConfidence);
//! ```

use super::evaluation::{EvaluationDetails, EvaluationResult, ReasonCode};
use crate::agent::{AgentOutput, AgentSlot, Verdict};
use std::collections::BTreeMap;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// Rule cascade parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusRules {
    pub confidence_threshold: f64,
}

impl Default for ConsensusRules {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ConsensusRules {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            confidence_threshold,
        }
    }

    /// Evaluate the outputs currently held by the council. Pure.
    pub fn evaluate(&self, outputs: &BTreeMap<AgentSlot, AgentOutput>) -> EvaluationResult {
        if outputs.is_empty() {
            return no_outputs();
        }

        let rejecting_agents: Vec<AgentSlot> = outputs
            .iter()
            .filter(|(_, o)| o.verdict == Verdict::Reject)
            .map(|(slot, _)| *slot)
            .collect();
        if !rejecting_agents.is_empty() {
            return EvaluationResult::reiterate(
                ReasonCode::Reject,
                EvaluationDetails::Rejected { rejecting_agents },
            );
        }

        let blocking_agents: BTreeMap<AgentSlot, Vec<String>> = outputs
            .iter()
            .filter(|(_, o)| o.has_blocking_issues())
            .map(|(slot, o)| (*slot, o.blocking_issues.clone()))
            .collect();
        if !blocking_agents.is_empty() {
            return EvaluationResult::reiterate(
                ReasonCode::BlockingIssues,
                EvaluationDetails::BlockingIssues { blocking_agents },
            );
        }

        let average_confidence = mean_confidence(outputs).unwrap_or(0.0);
        if average_confidence < self.confidence_threshold {
            return EvaluationResult::reiterate(
                ReasonCode::LowConfidence,
                EvaluationDetails::LowConfidence {
                    average_confidence,
                    threshold: self.confidence_threshold,
                    agent_confidences: outputs
                        .iter()
                        .map(|(slot, o)| (*slot, o.confidence))
                        .collect(),
                },
            );
        }

        EvaluationResult::terminate(
            ReasonCode::Consensus,
            EvaluationDetails::Consensus {
                average_confidence,
                verdicts: outputs.iter().map(|(slot, o)| (*slot, o.verdict)).collect(),
                agent_count: outputs.len(),
            },
        )
    }
}

/// Result for an empty output set, shared by both strategies
pub fn no_outputs() -> EvaluationResult {
    EvaluationResult::reiterate(
        ReasonCode::NoOutputs,
        EvaluationDetails::NoOutputs {
            message: "No agent produced a valid output".to_string(),
        },
    )
}

/// Arithmetic mean of the confidences present, `None` when empty
pub fn mean_confidence(outputs: &BTreeMap<AgentSlot, AgentOutput>) -> Option<f64> {
    if outputs.is_empty() {
        return None;
    }
    let total: f64 = outputs.values().map(|o| o.confidence).sum();
    Some(total / outputs.len() as f64)
}

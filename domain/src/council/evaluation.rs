//! Evaluation results
//!
//! Every consensus decision carries an action, a short machine-readable
//! reason code and a typed details record with the evidence for the reason.

use crate::agent::{AgentSlot, Verdict};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// What the loop does next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouncilAction {
    Terminate,
    Reiterate,
}

impl CouncilAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilAction::Terminate => "TERMINATE",
            CouncilAction::Reiterate => "REITERATE",
        }
    }

    /// Case-insensitive parse where anything but TERMINATE means another round
    pub fn from_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("TERMINATE") {
            CouncilAction::Terminate
        } else {
            CouncilAction::Reiterate
        }
    }
}

impl std::fmt::Display for CouncilAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const SERVICE_DECISION_PREFIX: &str = "AI_DECISION: ";

/// Machine-readable reason for a decision
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    NoOutputs,
    Reject,
    BlockingIssues,
    LowConfidence,
    Consensus,
    MaxIterations,
    /// Reason returned by the reasoning service
    ServiceDecision(String),
}

impl ReasonCode {
    /// Whether the code was produced by the rule cascade
    pub fn is_rule_based(&self) -> bool {
        !matches!(self, ReasonCode::ServiceDecision(_) | ReasonCode::MaxIterations)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonCode::NoOutputs => write!(f, "NO_OUTPUTS"),
            ReasonCode::Reject => write!(f, "REJECT"),
            ReasonCode::BlockingIssues => write!(f, "BLOCKING_ISSUES"),
            ReasonCode::LowConfidence => write!(f, "LOW_CONFIDENCE"),
            ReasonCode::Consensus => write!(f, "CONSENSUS"),
            ReasonCode::MaxIterations => write!(f, "MAX_ITERATIONS"),
            ReasonCode::ServiceDecision(reason) => {
                write!(f, "{}{}", SERVICE_DECISION_PREFIX, reason)
            }
        }
    }
}

impl std::str::FromStr for ReasonCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(reason) = s.strip_prefix(SERVICE_DECISION_PREFIX) {
            return Ok(ReasonCode::ServiceDecision(reason.to_string()));
        }
        match s {
            "NO_OUTPUTS" => Ok(ReasonCode::NoOutputs),
            "REJECT" => Ok(ReasonCode::Reject),
            "BLOCKING_ISSUES" => Ok(ReasonCode::BlockingIssues),
            "LOW_CONFIDENCE" => Ok(ReasonCode::LowConfidence),
            "CONSENSUS" => Ok(ReasonCode::Consensus),
            "MAX_ITERATIONS" => Ok(ReasonCode::MaxIterations),
            _ => Err(format!("Unknown reason code: {}", s)),
        }
    }
}

impl Serialize for ReasonCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReasonCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Evidence behind a decision, one variant per reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationDetails {
    NoOutputs {
        message: String,
    },
    Rejected {
        rejecting_agents: Vec<AgentSlot>,
    },
    BlockingIssues {
        blocking_agents: BTreeMap<AgentSlot, Vec<String>>,
    },
    LowConfidence {
        average_confidence: f64,
        threshold: f64,
        agent_confidences: BTreeMap<AgentSlot, f64>,
    },
    Consensus {
        average_confidence: f64,
        verdicts: BTreeMap<AgentSlot, Verdict>,
        agent_count: usize,
    },
    ServiceDecision {
        rationale: String,
        agent_verdicts: BTreeMap<AgentSlot, Verdict>,
        agent_confidences: BTreeMap<AgentSlot, f64>,
        total_agents: usize,
    },
    MaxIterations {
        iterations: u32,
        superseded_reason: Option<ReasonCode>,
        superseded_details: Option<Box<EvaluationDetails>>,
    },
}

/// A consensus decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub action: CouncilAction,
    pub reason: ReasonCode,
    pub details: EvaluationDetails,
}

impl EvaluationResult {
    pub fn reiterate(reason: ReasonCode, details: EvaluationDetails) -> Self {
        Self {
            action: CouncilAction::Reiterate,
            reason,
            details,
        }
    }

    pub fn terminate(reason: ReasonCode, details: EvaluationDetails) -> Self {
        Self {
            action: CouncilAction::Terminate,
            reason,
            details,
        }
    }

    pub fn is_terminate(&self) -> bool {
        self.action == CouncilAction::Terminate
    }

    /// Replace this decision with a forced stop, keeping what it superseded
    pub fn into_forced_stop(self, iterations: u32) -> Self {
        Self::terminate(
            ReasonCode::MaxIterations,
            EvaluationDetails::MaxIterations {
                iterations,
                superseded_reason: Some(self.reason),
                superseded_details: Some(Box::new(self.details)),
            },
        )
    }
}

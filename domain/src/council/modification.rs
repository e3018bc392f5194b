//! Modification requests carried into the next round

use crate::agent::{AgentOutput, AgentSlot, Verdict};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Recommendations from one agent that voted MODIFY
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRequest {
    pub agent: AgentSlot,
    pub agent_name: String,
    pub recommendations: Vec<String>,
}

/// Context projectable to agents as `pending_modifications`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModificationContext {
    /// Raw per-agent recommendations, no reasoning service available
    Pending { requests: Vec<ModificationRequest> },
    /// Reasoning service merged the requests
    Synthesized {
        requests: Vec<ModificationRequest>,
        synthesis: Value,
    },
    /// Reasoning service was asked but failed
    SynthesisFailed {
        requests: Vec<ModificationRequest>,
        error: String,
    },
}

impl ModificationContext {
    pub fn requests(&self) -> &[ModificationRequest] {
        match self {
            ModificationContext::Pending { requests }
            | ModificationContext::Synthesized { requests, .. }
            | ModificationContext::SynthesisFailed { requests, .. } => requests,
        }
    }
}

/// Collect requests from every output whose verdict is MODIFY, in slot order
pub fn collect_modification_requests(
    outputs: &BTreeMap<AgentSlot, AgentOutput>,
) -> Vec<ModificationRequest> {
    outputs
        .iter()
        .filter(|(_, o)| o.verdict == Verdict::Modify)
        .map(|(slot, o)| ModificationRequest {
            agent: *slot,
            agent_name: o.agent_name.clone(),
            recommendations: o.recommendations.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_only_modify_verdicts() {
        let mut outputs = BTreeMap::new();
        outputs.insert(
            AgentSlot::PersonalSuitability,
            AgentOutput::new("suitability", Verdict::Modify, 0.7)
                .with_recommendation("Reduce position to 10%"),
        );
        outputs.insert(
            AgentSlot::RiskQualification,
            AgentOutput::new("risk", Verdict::Approve, 0.9).with_recommendation("Ignored"),
        );

        let requests = collect_modification_requests(&outputs);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].agent, AgentSlot::PersonalSuitability);
        assert_eq!(requests[0].recommendations, vec!["Reduce position to 10%"]);
    }

    #[test]
    fn test_context_serialization() {
        let context = ModificationContext::SynthesisFailed {
            requests: Vec::new(),
            error: "timeout".to_string(),
        };
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["status"], "synthesis_failed");
        assert_eq!(json["error"], "timeout");
        assert!(context.requests().is_empty());
    }
}

//! Final recommendation projected from a terminal state

use super::evaluation::{CouncilAction, EvaluationDetails, ReasonCode};
use super::state::{CouncilState, IterationRecord};
use crate::agent::{AgentSlot, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRecommendation {
    pub asset_id: String,
    pub proposed_amount: f64,
    /// Final reason code, `None` only if no iteration ever ran
    pub recommendation: Option<ReasonCode>,
    /// True when the final action is TERMINATE (including forced stops)
    pub consensus: bool,
    /// True when the run was stopped by `max_iterations`
    pub forced_stop: bool,
    pub iterations: u32,
    pub agent_verdicts: BTreeMap<AgentSlot, Option<Verdict>>,
    /// Mean over agents that reported at least once
    pub average_confidence: Option<f64>,
    pub details: Option<EvaluationDetails>,
    pub debate_history: Vec<IterationRecord>,
}

impl FinalRecommendation {
    /// Project `state`; `tracked` lists the registered slots
    pub fn from_state(state: &CouncilState, tracked: &[AgentSlot]) -> Self {
        let decision = state.decision();
        Self {
            asset_id: state.asset_candidate().asset_id.clone(),
            proposed_amount: state.position().proposed_investment_amount,
            recommendation: decision.map(|d| d.reason.clone()),
            consensus: decision.is_some_and(|d| d.action == CouncilAction::Terminate),
            forced_stop: decision.is_some_and(|d| d.reason == ReasonCode::MaxIterations),
            iterations: state.iteration(),
            agent_verdicts: tracked
                .iter()
                .map(|slot| (*slot, state.output(*slot).map(|o| o.verdict)))
                .collect(),
            average_confidence: state.mean_confidence(),
            details: decision.map(|d| d.details.clone()),
            debate_history: state.debate_history().to_vec(),
        }
    }
}

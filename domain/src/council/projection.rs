//! Input projection
//!
//! An agent never sees the whole council state. [`project`] copies exactly
//! the fields the agent declared into an [`AgentInput`]; declared fields the
//! state cannot supply yet (a peer that has not reported, no pending
//! modifications) are left out and listed in [`AgentInput::missing`].

use super::modification::ModificationContext;
use super::state::CouncilState;
use crate::agent::{AgentOutput, AgentSlot, InputField};
use crate::investment::{AssetCandidate, MarketContext, Position, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only view handed to one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInput {
    pub slot: AgentSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_candidate: Option<AssetCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_context: Option<MarketContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_modifications: Option<ModificationContext>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub peer_outputs: BTreeMap<AgentSlot, AgentOutput>,
    /// Declared fields the state could not supply
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<InputField>,
}

impl AgentInput {
    fn empty(slot: AgentSlot) -> Self {
        Self {
            slot,
            user_profile: None,
            asset_candidate: None,
            market_context: None,
            position: None,
            iteration: None,
            pending_modifications: None,
            peer_outputs: BTreeMap::new(),
            missing: Vec::new(),
        }
    }

    pub fn peer(&self, slot: AgentSlot) -> Option<&AgentOutput> {
        self.peer_outputs.get(&slot)
    }
}

/// Build the view `slot` is allowed to read
pub fn project(state: &CouncilState, slot: AgentSlot, fields: &[InputField]) -> AgentInput {
    let mut input = AgentInput::empty(slot);

    for field in fields {
        match field {
            InputField::UserProfile => input.user_profile = Some(state.user_profile().clone()),
            InputField::AssetCandidate => {
                input.asset_candidate = Some(state.asset_candidate().clone())
            }
            InputField::MarketContext => {
                input.market_context = Some(state.market_context().clone())
            }
            InputField::Position => input.position = Some(*state.position()),
            InputField::Iteration => input.iteration = Some(state.iteration()),
            InputField::PendingModifications => match state.pending_modifications() {
                Some(context) => input.pending_modifications = Some(context.clone()),
                None => input.missing.push(*field),
            },
            InputField::PeerOutput(peer) => match state.output(*peer) {
                Some(output) => {
                    input.peer_outputs.insert(*peer, output.clone());
                }
                None => input.missing.push(*field),
            },
        }
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{InputManifest, Verdict};
    use crate::council::state::CouncilInputs;

    fn state() -> CouncilState {
        CouncilState::new(
            CouncilInputs {
                user_profile: UserProfile::default(),
                asset_candidate: AssetCandidate::new("AAPL_2026", "Apple Inc."),
                market_context: MarketContext::default(),
                position: Position::new(50_000.0, 0.15).unwrap(),
            },
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_projects_only_declared_fields() {
        let state = state();
        let manifest = InputManifest::default();
        let input = project(
            &state,
            AgentSlot::MarketAnalysis,
            manifest.fields_for(AgentSlot::MarketAnalysis),
        );

        assert!(input.asset_candidate.is_some());
        assert!(input.market_context.is_some());
        assert!(input.user_profile.is_none());
        assert!(input.position.is_none());
        assert!(input.missing.is_empty());
    }

    #[test]
    fn test_absent_peer_is_reported_missing() {
        let state = state();
        let manifest = InputManifest::default();
        let input = project(
            &state,
            AgentSlot::DevilsAdvocate,
            manifest.fields_for(AgentSlot::DevilsAdvocate),
        );

        assert!(input.peer_outputs.is_empty());
        assert_eq!(
            input.missing,
            vec![InputField::PeerOutput(AgentSlot::RiskQualification)]
        );
    }

    #[test]
    fn test_present_peer_is_copied() {
        let mut state = state();
        state.begin_iteration().unwrap();
        state
            .store_output(
                AgentSlot::RiskQualification,
                AgentOutput::new("risk", Verdict::Modify, 0.6),
            )
            .unwrap();

        let input = project(
            &state,
            AgentSlot::DevilsAdvocate,
            &[
                InputField::Iteration,
                InputField::PeerOutput(AgentSlot::RiskQualification),
                InputField::PendingModifications,
            ],
        );

        assert_eq!(input.iteration, Some(1));
        assert_eq!(
            input.peer(AgentSlot::RiskQualification).unwrap().verdict,
            Verdict::Modify
        );
        assert_eq!(input.missing, vec![InputField::PendingModifications]);
    }

    #[test]
    fn test_serialized_input_omits_undeclared_fields() {
        let state = state();
        let input = project(&state, AgentSlot::MarketAnalysis, &[InputField::AssetCandidate]);
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["slot"], "market_analysis");
        assert_eq!(json["asset_candidate"]["asset_id"], "AAPL_2026");
        assert!(json.get("user_profile").is_none());
        assert!(json.get("missing").is_none());
    }
}

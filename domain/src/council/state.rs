//! Council state machine
//!
//! One [`CouncilState`] exists per decision request. It owns the immutable
//! run inputs and everything the loop accumulates: the latest output per
//! slot, the iteration counter, the current decision, the debate history and
//! the pending modification context.
//!
//! ```text
//! INITIALIZING ──begin_iteration──▶ ITERATING ──finalize──▶ TERMINATED
//! ```
//!
//! Once terminated the state is sealed and every mutator returns
//! [`DomainError::CouncilTerminated`].

use super::evaluation::{CouncilAction, EvaluationDetails, EvaluationResult, ReasonCode};
use super::modification::ModificationContext;
use super::rules;
use crate::agent::{AgentOutput, AgentSlot, Verdict};
use crate::core::error::DomainError;
use crate::investment::{AssetCandidate, MarketContext, Position, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle phase of a council run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouncilPhase {
    Initializing,
    Iterating,
    Terminated,
}

impl CouncilPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilPhase::Initializing => "INITIALIZING",
            CouncilPhase::Iterating => "ITERATING",
            CouncilPhase::Terminated => "TERMINATED",
        }
    }
}

impl std::fmt::Display for CouncilPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four records fixed at initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilInputs {
    pub user_profile: UserProfile,
    pub asset_candidate: AssetCandidate,
    pub market_context: MarketContext,
    pub position: Position,
}

/// Snapshot of one completed iteration, never mutated after append
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    /// Every tracked slot, `None` when the slot had no output
    pub verdicts: BTreeMap<AgentSlot, Option<Verdict>>,
    pub decision: ReasonCode,
    pub action: CouncilAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilState {
    inputs: CouncilInputs,
    outputs: BTreeMap<AgentSlot, AgentOutput>,
    iteration: u32,
    max_iterations: u32,
    decision: Option<EvaluationResult>,
    debate_history: Vec<IterationRecord>,
    pending_modifications: Option<ModificationContext>,
    phase: CouncilPhase,
}

impl CouncilState {
    /// Build a fresh state at iteration 0 with empty history
    pub fn new(inputs: CouncilInputs, max_iterations: u32) -> Result<Self, DomainError> {
        if max_iterations == 0 {
            return Err(DomainError::InvalidMaxIterations);
        }
        Ok(Self {
            inputs,
            outputs: BTreeMap::new(),
            iteration: 0,
            max_iterations,
            decision: None,
            debate_history: Vec::new(),
            pending_modifications: None,
            phase: CouncilPhase::Initializing,
        })
    }

    pub fn inputs(&self) -> &CouncilInputs {
        &self.inputs
    }

    pub fn user_profile(&self) -> &UserProfile {
        &self.inputs.user_profile
    }

    pub fn asset_candidate(&self) -> &AssetCandidate {
        &self.inputs.asset_candidate
    }

    pub fn market_context(&self) -> &MarketContext {
        &self.inputs.market_context
    }

    pub fn position(&self) -> &Position {
        &self.inputs.position
    }

    pub fn outputs(&self) -> &BTreeMap<AgentSlot, AgentOutput> {
        &self.outputs
    }

    pub fn output(&self, slot: AgentSlot) -> Option<&AgentOutput> {
        self.outputs.get(&slot)
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn decision(&self) -> Option<&EvaluationResult> {
        self.decision.as_ref()
    }

    pub fn debate_history(&self) -> &[IterationRecord] {
        &self.debate_history
    }

    pub fn pending_modifications(&self) -> Option<&ModificationContext> {
        self.pending_modifications.as_ref()
    }

    pub fn phase(&self) -> CouncilPhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == CouncilPhase::Terminated
    }

    /// Mean confidence across slots that currently hold an output
    pub fn mean_confidence(&self) -> Option<f64> {
        rules::mean_confidence(&self.outputs)
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_terminated() {
            return Err(DomainError::CouncilTerminated);
        }
        Ok(())
    }

    /// Start the next pass; returns the new iteration number
    pub fn begin_iteration(&mut self) -> Result<u32, DomainError> {
        self.ensure_open()?;
        self.iteration += 1;
        self.phase = CouncilPhase::Iterating;
        Ok(self.iteration)
    }

    /// Store a validated output, replacing whatever the slot held before
    pub fn store_output(&mut self, slot: AgentSlot, output: AgentOutput) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.outputs.insert(slot, output);
        Ok(())
    }

    /// Store this iteration's decision and append its history snapshot.
    ///
    /// `tracked` lists the slots that appear in the snapshot (the registered
    /// agents); slots without an output are recorded as `None`.
    pub fn record_decision(
        &mut self,
        result: EvaluationResult,
        tracked: &[AgentSlot],
    ) -> Result<&IterationRecord, DomainError> {
        self.ensure_open()?;
        let record = IterationRecord {
            iteration: self.iteration,
            verdicts: tracked
                .iter()
                .map(|slot| (*slot, self.outputs.get(slot).map(|o| o.verdict)))
                .collect(),
            decision: result.reason.clone(),
            action: result.action,
        };
        self.decision = Some(result);
        self.debate_history.push(record);
        Ok(&self.debate_history[self.debate_history.len() - 1])
    }

    /// Replace the modification context; `None` clears it
    pub fn set_pending_modifications(
        &mut self,
        context: Option<ModificationContext>,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.pending_modifications = context;
        Ok(())
    }

    /// Whether the loop must stop after the current iteration
    pub fn should_stop(&self) -> bool {
        self.decision.as_ref().is_some_and(|d| d.is_terminate())
            || self.iteration >= self.max_iterations
    }

    /// Seal the state.
    ///
    /// Without a TERMINATE decision the run must have hit `max_iterations`;
    /// the decision is then overwritten with TERMINATE / `MAX_ITERATIONS`.
    pub fn finalize(&mut self) -> Result<(), DomainError> {
        self.ensure_open()?;

        let terminated = self.decision.as_ref().is_some_and(|d| d.is_terminate());
        if !terminated {
            if self.iteration < self.max_iterations {
                return Err(DomainError::PrematureTermination {
                    iteration: self.iteration,
                    max_iterations: self.max_iterations,
                });
            }
            let forced = match self.decision.take() {
                Some(previous) => previous.into_forced_stop(self.iteration),
                None => EvaluationResult::terminate(
                    ReasonCode::MaxIterations,
                    EvaluationDetails::MaxIterations {
                        iterations: self.iteration,
                        superseded_reason: None,
                        superseded_details: None,
                    },
                ),
            };
            self.decision = Some(forced);
        }

        self.phase = CouncilPhase::Terminated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> CouncilInputs {
        CouncilInputs {
            user_profile: UserProfile::default(),
            asset_candidate: AssetCandidate::new("AAPL", "Apple Inc."),
            market_context: MarketContext::default(),
            position: Position::new(10_000.0, 0.05).unwrap(),
        }
    }

    fn low_confidence() -> EvaluationResult {
        EvaluationResult::reiterate(
            ReasonCode::LowConfidence,
            EvaluationDetails::LowConfidence {
                average_confidence: 0.5,
                threshold: 0.75,
                agent_confidences: BTreeMap::new(),
            },
        )
    }

    fn consensus() -> EvaluationResult {
        EvaluationResult::terminate(
            ReasonCode::Consensus,
            EvaluationDetails::Consensus {
                average_confidence: 0.9,
                verdicts: BTreeMap::new(),
                agent_count: 1,
            },
        )
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        assert_eq!(
            CouncilState::new(inputs(), 0).unwrap_err(),
            DomainError::InvalidMaxIterations
        );
    }

    #[test]
    fn test_new_state() {
        let state = CouncilState::new(inputs(), 3).unwrap();
        assert_eq!(state.iteration(), 0);
        assert_eq!(state.phase(), CouncilPhase::Initializing);
        assert!(state.debate_history().is_empty());
        assert!(state.decision().is_none());
        assert!(!state.should_stop());
    }

    #[test]
    fn test_store_output_overwrites() {
        let mut state = CouncilState::new(inputs(), 3).unwrap();
        state.begin_iteration().unwrap();
        state
            .store_output(
                AgentSlot::RiskQualification,
                AgentOutput::new("risk", Verdict::Modify, 0.5),
            )
            .unwrap();
        state
            .store_output(
                AgentSlot::RiskQualification,
                AgentOutput::new("risk", Verdict::Approve, 0.9),
            )
            .unwrap();

        assert_eq!(state.outputs().len(), 1);
        assert_eq!(
            state.output(AgentSlot::RiskQualification).unwrap().verdict,
            Verdict::Approve
        );
    }

    #[test]
    fn test_history_records_absent_slots() {
        let mut state = CouncilState::new(inputs(), 3).unwrap();
        state.begin_iteration().unwrap();
        state
            .store_output(
                AgentSlot::MarketAnalysis,
                AgentOutput::new("market", Verdict::Approve, 0.6),
            )
            .unwrap();

        let record = state
            .record_decision(
                low_confidence(),
                &[AgentSlot::RiskQualification, AgentSlot::MarketAnalysis],
            )
            .unwrap()
            .clone();

        assert_eq!(record.iteration, 1);
        assert_eq!(record.verdicts[&AgentSlot::RiskQualification], None);
        assert_eq!(
            record.verdicts[&AgentSlot::MarketAnalysis],
            Some(Verdict::Approve)
        );
        assert_eq!(record.decision, ReasonCode::LowConfidence);
        assert_eq!(state.debate_history().len(), 1);
    }

    #[test]
    fn test_finalize_after_consensus() {
        let mut state = CouncilState::new(inputs(), 5).unwrap();
        state.begin_iteration().unwrap();
        state.record_decision(consensus(), &[]).unwrap();

        assert!(state.should_stop());
        state.finalize().unwrap();
        assert!(state.is_terminated());
        assert_eq!(state.decision().unwrap().reason, ReasonCode::Consensus);
    }

    #[test]
    fn test_finalize_at_max_iterations_overrides_decision() {
        let mut state = CouncilState::new(inputs(), 2).unwrap();
        for _ in 0..2 {
            state.begin_iteration().unwrap();
            state.record_decision(low_confidence(), &[]).unwrap();
        }

        assert!(state.should_stop());
        state.finalize().unwrap();

        let decision = state.decision().unwrap();
        assert_eq!(decision.action, CouncilAction::Terminate);
        assert_eq!(decision.reason, ReasonCode::MaxIterations);
        assert!(matches!(
            decision.details,
            EvaluationDetails::MaxIterations {
                superseded_reason: Some(ReasonCode::LowConfidence),
                ..
            }
        ));
        // History keeps the reason seen at the time
        assert_eq!(
            state.debate_history()[1].decision,
            ReasonCode::LowConfidence
        );
    }

    #[test]
    fn test_finalize_before_stop_is_error() {
        let mut state = CouncilState::new(inputs(), 3).unwrap();
        state.begin_iteration().unwrap();
        state.record_decision(low_confidence(), &[]).unwrap();

        assert!(matches!(
            state.finalize(),
            Err(DomainError::PrematureTermination {
                iteration: 1,
                max_iterations: 3
            })
        ));
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_sealed_state_rejects_mutation() {
        let mut state = CouncilState::new(inputs(), 1).unwrap();
        state.begin_iteration().unwrap();
        state.record_decision(consensus(), &[]).unwrap();
        state.finalize().unwrap();

        assert!(state.begin_iteration().unwrap_err().is_sealed());
        assert!(
            state
                .store_output(
                    AgentSlot::DevilsAdvocate,
                    AgentOutput::new("devil", Verdict::Reject, 0.9)
                )
                .unwrap_err()
                .is_sealed()
        );
        assert!(state.set_pending_modifications(None).unwrap_err().is_sealed());
        assert!(state.finalize().unwrap_err().is_sealed());
    }

    #[test]
    fn test_mean_confidence() {
        let mut state = CouncilState::new(inputs(), 3).unwrap();
        assert_eq!(state.mean_confidence(), None);
        state.begin_iteration().unwrap();
        state
            .store_output(
                AgentSlot::RiskQualification,
                AgentOutput::new("risk", Verdict::Approve, 0.9),
            )
            .unwrap();
        state
            .store_output(
                AgentSlot::MarketAnalysis,
                AgentOutput::new("market", Verdict::Approve, 0.5),
            )
            .unwrap();
        assert!((state.mean_confidence().unwrap() - 0.7).abs() < 1e-9);
    }
}

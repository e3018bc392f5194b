//! Consensus evaluators
//!
//! Two interchangeable strategies behind [`ConsensusEvaluator`]:
//!
//! | Evaluator | Decides with | On failure |
//! |-----------|--------------|------------|
//! | [`RulesEvaluator`] | [`ConsensusRules`] cascade | cannot fail |
//! | [`ReasoningEvaluator`] | external [`ReasoningService`] | falls back to the rules |

use crate::config::ConsensusStrategy;
use crate::ports::reasoning_service::ReasoningService;
use async_trait::async_trait;
use council_domain::council::{no_outputs, parse_service_verdict};
use council_domain::{
    ConsensusRules, CouncilPromptTemplate, CouncilState, EvaluationDetails, EvaluationResult,
    ReasonCode,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Decision plus the reason a fallback happened, if one did
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub result: EvaluationResult,
    pub fallback_cause: Option<String>,
}

impl EvaluationOutcome {
    fn decided(result: EvaluationResult) -> Self {
        Self {
            result,
            fallback_cause: None,
        }
    }
}

#[async_trait]
pub trait ConsensusEvaluator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn evaluate(&self, state: &CouncilState) -> EvaluationOutcome;
}

pub struct RulesEvaluator {
    rules: ConsensusRules,
}

impl RulesEvaluator {
    pub fn new(rules: ConsensusRules) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl ConsensusEvaluator for RulesEvaluator {
    fn name(&self) -> &'static str {
        "rules"
    }

    async fn evaluate(&self, state: &CouncilState) -> EvaluationOutcome {
        EvaluationOutcome::decided(self.rules.evaluate(state.outputs()))
    }
}

pub struct ReasoningEvaluator {
    service: Arc<dyn ReasoningService>,
    rules: ConsensusRules,
}

impl ReasoningEvaluator {
    pub fn new(service: Arc<dyn ReasoningService>, rules: ConsensusRules) -> Self {
        Self { service, rules }
    }

    fn fall_back(&self, state: &CouncilState, cause: String) -> EvaluationOutcome {
        warn!(
            "Reasoning service ({}) evaluation failed, using rules: {}",
            self.service.engine(),
            cause
        );
        EvaluationOutcome {
            result: self.rules.evaluate(state.outputs()),
            fallback_cause: Some(cause),
        }
    }
}

#[async_trait]
impl ConsensusEvaluator for ReasoningEvaluator {
    fn name(&self) -> &'static str {
        "reasoning"
    }

    async fn evaluate(&self, state: &CouncilState) -> EvaluationOutcome {
        let outputs = state.outputs();
        if outputs.is_empty() {
            return EvaluationOutcome::decided(no_outputs());
        }

        let prompt = CouncilPromptTemplate::evaluation_prompt(state);
        debug!("Evaluation prompt: {} chars", prompt.len());

        let text = match self.service.reason(&prompt).await {
            Ok(text) => text,
            Err(e) => return self.fall_back(state, e.to_string()),
        };

        match parse_service_verdict(&text) {
            Ok(verdict) => EvaluationOutcome::decided(EvaluationResult {
                action: verdict.action,
                reason: ReasonCode::ServiceDecision(verdict.reason),
                details: EvaluationDetails::ServiceDecision {
                    rationale: verdict.rationale,
                    agent_verdicts: outputs.iter().map(|(s, o)| (*s, o.verdict)).collect(),
                    agent_confidences: outputs.iter().map(|(s, o)| (*s, o.confidence)).collect(),
                    total_agents: outputs.len(),
                },
            }),
            Err(e) => self.fall_back(state, e.to_string()),
        }
    }
}

/// Pick the evaluator for `strategy`.
///
/// The reasoning strategy is used only when a service was initialized;
/// otherwise the rules run unconditionally.
pub fn select_evaluator(
    strategy: ConsensusStrategy,
    service: Option<Arc<dyn ReasoningService>>,
    rules: ConsensusRules,
) -> Box<dyn ConsensusEvaluator> {
    match (strategy, service) {
        (ConsensusStrategy::Reasoning, Some(service)) => {
            Box::new(ReasoningEvaluator::new(service, rules))
        }
        (ConsensusStrategy::Reasoning, None) => {
            warn!("Reasoning strategy configured without a reasoning service; using rules");
            Box::new(RulesEvaluator::new(rules))
        }
        (ConsensusStrategy::Rules, _) => Box::new(RulesEvaluator::new(rules)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning_service::ReasoningError;
    use crate::test_support::{ScriptedReasoning, sample_state};
    use council_domain::{AgentOutput, AgentSlot, CouncilAction, Verdict};

    fn state_with(outputs: &[(AgentSlot, Verdict, f64)]) -> CouncilState {
        let mut state = sample_state(5);
        state.begin_iteration().unwrap();
        for (slot, verdict, confidence) in outputs {
            state
                .store_output(*slot, AgentOutput::new(slot.as_str(), *verdict, *confidence))
                .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn test_service_decision() {
        let service = Arc::new(ScriptedReasoning::new(vec![Ok(
            r#"{"action": "terminate", "reason": "aligned", "reasoning": "Everyone agrees"}"#
                .to_string(),
        )]));
        let evaluator = ReasoningEvaluator::new(service.clone(), ConsensusRules::default());
        let state = state_with(&[(AgentSlot::RiskQualification, Verdict::Approve, 0.5)]);

        let outcome = evaluator.evaluate(&state).await;
        assert!(outcome.fallback_cause.is_none());
        assert_eq!(outcome.result.action, CouncilAction::Terminate);
        assert_eq!(outcome.result.reason.to_string(), "AI_DECISION: aligned");
        assert_eq!(service.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_outputs_skip_service() {
        let service = Arc::new(ScriptedReasoning::new(vec![]));
        let evaluator = ReasoningEvaluator::new(service.clone(), ConsensusRules::default());

        let outcome = evaluator.evaluate(&state_with(&[])).await;
        assert_eq!(outcome.result.reason, ReasonCode::NoOutputs);
        assert!(service.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_rules() {
        let state = state_with(&[
            (AgentSlot::RiskQualification, Verdict::Approve, 0.9),
            (AgentSlot::DevilsAdvocate, Verdict::Reject, 0.8),
        ]);
        let expected = ConsensusRules::default().evaluate(state.outputs());

        let replies = vec![
            Err(ReasoningError::Timeout),
            Ok("I would keep debating.".to_string()),
            Ok(r#"{"reason": "no action here"}"#.to_string()),
        ];
        let service = Arc::new(ScriptedReasoning::new(replies));
        let evaluator = ReasoningEvaluator::new(service, ConsensusRules::default());

        for _ in 0..3 {
            let outcome = evaluator.evaluate(&state).await;
            assert!(outcome.fallback_cause.is_some());
            assert_eq!(outcome.result, expected);
        }
    }

    #[tokio::test]
    async fn test_select_without_service_uses_rules() {
        let evaluator = select_evaluator(
            ConsensusStrategy::Reasoning,
            None,
            ConsensusRules::default(),
        );
        assert_eq!(evaluator.name(), "rules");

        let service: Arc<dyn ReasoningService> = Arc::new(ScriptedReasoning::new(vec![]));
        let evaluator = select_evaluator(
            ConsensusStrategy::Rules,
            Some(Arc::clone(&service)),
            ConsensusRules::default(),
        );
        assert_eq!(evaluator.name(), "rules");

        let evaluator = select_evaluator(
            ConsensusStrategy::Reasoning,
            Some(service),
            ConsensusRules::default(),
        );
        assert_eq!(evaluator.name(), "reasoning");
    }
}

//! Run Council use case
//!
//! Drives the council from initialization to a sealed terminal state:
//!
//! ```text
//! initialize ──▶ loop {
//!                   begin iteration
//!                   invoke agents (snapshot)   ──▶ store accepted outputs in slot order
//!                   evaluate (rules | reasoning)
//!                   record decision + history
//!                   stop? ──yes──▶ finalize
//!                   synthesize modifications
//!                }
//! ```

use crate::config::CouncilParams;
use crate::ports::council_logger::{CouncilEvent, CouncilLogger, NoCouncilLogger};
use crate::ports::data_source::{CouncilDataSource, DataSourceError};
use crate::ports::progress::{CouncilProgress, NoProgress};
use crate::ports::reasoning_service::ReasoningService;
use crate::use_cases::agent_registry::{AgentOutcome, AgentRegistry, invoke_agents};
use crate::use_cases::evaluate_consensus::{ConsensusEvaluator, select_evaluator};
use crate::use_cases::synthesize_modifications::ModificationSynthesizer;
use council_domain::{
    AgentSlot, CouncilInputs, CouncilState, DomainError, FinalRecommendation, Position,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Fatal errors; everything else is absorbed by the loop
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No agents registered")]
    NoAgents,

    #[error("No data source configured")]
    NoDataSource,

    #[error("Initialization failed: {0}")]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct CouncilRequest {
    pub user_id: String,
    pub asset_id: String,
    pub proposed_amount: f64,
    /// Fraction of the total portfolio (0.15 = 15%)
    pub percentage_of_portfolio: f64,
}

impl CouncilRequest {
    pub fn new(
        user_id: impl Into<String>,
        asset_id: impl Into<String>,
        proposed_amount: f64,
        percentage_of_portfolio: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            asset_id: asset_id.into(),
            proposed_amount,
            percentage_of_portfolio,
        }
    }
}

/// Output of a finished run
#[derive(Debug, Clone)]
pub struct RunCouncilOutput {
    pub state: CouncilState,
    pub recommendation: FinalRecommendation,
}

/// Use case for running a council deliberation
pub struct RunCouncilUseCase {
    registry: AgentRegistry,
    params: CouncilParams,
    reasoning: Option<Arc<dyn ReasoningService>>,
    data_source: Option<Arc<dyn CouncilDataSource>>,
    logger: Arc<dyn CouncilLogger>,
}

impl RunCouncilUseCase {
    pub fn new(registry: AgentRegistry, params: CouncilParams) -> Self {
        Self {
            registry,
            params,
            reasoning: None,
            data_source: None,
            logger: Arc::new(NoCouncilLogger),
        }
    }

    pub fn with_reasoning_service(mut self, service: Arc<dyn ReasoningService>) -> Self {
        self.reasoning = Some(service);
        self
    }

    pub fn with_data_source(mut self, data_source: Arc<dyn CouncilDataSource>) -> Self {
        self.data_source = Some(data_source);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn CouncilLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &CouncilParams {
        &self.params
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: CouncilRequest,
    ) -> Result<RunCouncilOutput, RunCouncilError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Look up the inputs and deliberate, with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: CouncilRequest,
        progress: &dyn CouncilProgress,
    ) -> Result<RunCouncilOutput, RunCouncilError> {
        let state = self.initialize(&request).await?;
        self.run(state, progress).await
    }

    /// Deliberate on caller-supplied inputs, bypassing the data source
    pub async fn execute_with_inputs(
        &self,
        inputs: CouncilInputs,
        progress: &dyn CouncilProgress,
    ) -> Result<RunCouncilOutput, RunCouncilError> {
        let state = CouncilState::new(inputs, self.params.max_iterations)?;
        self.run(state, progress).await
    }

    async fn run(
        &self,
        state: CouncilState,
        progress: &dyn CouncilProgress,
    ) -> Result<RunCouncilOutput, RunCouncilError> {
        let state = self.deliberate(state, progress).await?;
        let recommendation = self.final_recommendation(&state);
        Ok(RunCouncilOutput {
            state,
            recommendation,
        })
    }

    /// INITIALIZING: look up the three records and derive the position
    pub async fn initialize(
        &self,
        request: &CouncilRequest,
    ) -> Result<CouncilState, RunCouncilError> {
        let data_source = self
            .data_source
            .as_ref()
            .ok_or(RunCouncilError::NoDataSource)?;

        let user_profile = data_source.user_profile(&request.user_id).await?;
        let asset_candidate = data_source.asset_candidate(&request.asset_id).await?;
        let market_context = data_source.market_context().await?;
        let position = Position::new(request.proposed_amount, request.percentage_of_portfolio)?;

        info!(
            "Council initialized for user {} / asset {} (risk {}, {} {})",
            request.user_id,
            request.asset_id,
            user_profile.risk_tolerance,
            asset_candidate.asset_type,
            market_context.market_trend
        );

        Ok(CouncilState::new(
            CouncilInputs {
                user_profile,
                asset_candidate,
                market_context,
                position,
            },
            self.params.max_iterations,
        )?)
    }

    /// Run the loop until TERMINATE or `max_iterations`, then seal the state
    pub async fn deliberate(
        &self,
        mut state: CouncilState,
        progress: &dyn CouncilProgress,
    ) -> Result<CouncilState, RunCouncilError> {
        if self.registry.is_empty() {
            return Err(RunCouncilError::NoAgents);
        }

        let evaluator = select_evaluator(
            self.params.strategy,
            self.reasoning.clone(),
            self.params.rules(),
        );
        let synthesizer = ModificationSynthesizer::new(self.reasoning.clone());
        let tracked = self.registry.slots();

        info!(
            "Starting council with {} agents, {} evaluator, max {} iterations",
            tracked.len(),
            evaluator.name(),
            state.max_iterations()
        );
        self.logger.log(CouncilEvent::new(
            "run_started",
            json!({
                "asset_id": state.asset_candidate().asset_id,
                "agents": tracked,
                "strategy": evaluator.name(),
                "max_iterations": state.max_iterations(),
            }),
        ));

        loop {
            self.run_iteration(&mut state, evaluator.as_ref(), &tracked, progress)
                .await?;

            if state.should_stop() {
                break;
            }

            let context = synthesizer.synthesize(&state).await;
            if let Some(context) = &context {
                self.logger.log(CouncilEvent::new(
                    "modifications",
                    json!({
                        "iteration": state.iteration(),
                        "context": context,
                    }),
                ));
            }
            state.set_pending_modifications(context)?;
        }

        state.finalize()?;

        if let Some(decision) = state.decision() {
            info!(
                "Council terminated after {} iterations: {}",
                state.iteration(),
                decision.reason
            );
            progress.on_terminated(decision);
            self.logger.log(CouncilEvent::new(
                "terminated",
                json!({
                    "iteration": state.iteration(),
                    "decision": decision,
                }),
            ));
        }

        Ok(state)
    }

    /// One pass: invoke, store, evaluate, record
    async fn run_iteration(
        &self,
        state: &mut CouncilState,
        evaluator: &dyn ConsensusEvaluator,
        tracked: &[AgentSlot],
        progress: &dyn CouncilProgress,
    ) -> Result<(), RunCouncilError> {
        let iteration = state.begin_iteration()?;
        info!("Iteration {}/{}", iteration, state.max_iterations());
        progress.on_iteration_start(iteration, state.max_iterations(), tracked.len());

        let snapshot = state.clone();
        let outcomes = invoke_agents(
            &self.registry,
            &self.params.manifest,
            &snapshot,
            self.params.parallel_agents,
        )
        .await;

        for (slot, outcome) in outcomes {
            progress.on_agent_complete(slot, outcome.is_accepted());
            match outcome {
                AgentOutcome::Accepted(output) => {
                    debug!(
                        "{}: {} ({:.2})",
                        slot, output.verdict, output.confidence
                    );
                    self.logger.log(CouncilEvent::new(
                        "agent_accepted",
                        json!({
                            "iteration": iteration,
                            "slot": slot,
                            "verdict": output.verdict,
                            "confidence": output.confidence,
                        }),
                    ));
                    state.store_output(slot, output)?;
                }
                AgentOutcome::Invalid(violations) => {
                    let violations: Vec<String> =
                        violations.iter().map(|v| v.to_string()).collect();
                    warn!("{}: invalid output discarded: {}", slot, violations.join("; "));
                    self.logger.log(CouncilEvent::new(
                        "agent_rejected",
                        json!({
                            "iteration": iteration,
                            "slot": slot,
                            "violations": violations,
                        }),
                    ));
                }
                AgentOutcome::Failed(message) => {
                    error!("{}: {}", slot, message);
                    self.logger.log(CouncilEvent::new(
                        "agent_failed",
                        json!({
                            "iteration": iteration,
                            "slot": slot,
                            "error": message,
                        }),
                    ));
                }
            }
        }

        let outcome = evaluator.evaluate(state).await;
        if let Some(cause) = &outcome.fallback_cause {
            self.logger.log(CouncilEvent::new(
                "fallback",
                json!({
                    "iteration": iteration,
                    "cause": cause,
                }),
            ));
        }

        info!(
            "Council evaluation: {} ({})",
            outcome.result.action, outcome.result.reason
        );
        progress.on_evaluation(iteration, &outcome.result);
        self.logger.log(CouncilEvent::new(
            "evaluation",
            json!({
                "iteration": iteration,
                "evaluator": evaluator.name(),
                "result": &outcome.result,
            }),
        ));

        state.record_decision(outcome.result, tracked)?;
        Ok(())
    }

    /// Project a terminal state for the caller
    pub fn final_recommendation(&self, state: &CouncilState) -> FinalRecommendation {
        FinalRecommendation::from_state(state, &self.registry.slots())
    }
}

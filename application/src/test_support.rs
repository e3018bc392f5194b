//! Scripted port implementations shared by use case tests

use crate::ports::council_agent::{AgentError, CouncilAgent};
use crate::ports::council_logger::{CouncilEvent, CouncilLogger};
use crate::ports::data_source::{CouncilDataSource, DataSourceError};
use crate::ports::progress::CouncilProgress;
use crate::ports::reasoning_service::{ReasoningError, ReasoningService};
use async_trait::async_trait;
use council_domain::{
    AgentInput, AgentSlot, AgentSubmission, AssetCandidate, CouncilInputs, CouncilState,
    EvaluationResult, MarketContext, Position, UserProfile,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn submission(name: &str, verdict: &str, confidence: f64) -> AgentSubmission {
    serde_json::from_value(json!({
        "agent_name": name,
        "verdict": verdict,
        "confidence": confidence,
        "key_findings": [format!("{} finding", name)],
        "blocking_issues": [],
        "recommendations": [],
        "reasoning": format!("{} reasoning", name),
        "metrics": {}
    }))
    .unwrap()
}

pub fn sample_inputs() -> CouncilInputs {
    CouncilInputs {
        user_profile: UserProfile::default(),
        asset_candidate: AssetCandidate::new("AAPL_2026", "Apple Inc."),
        market_context: MarketContext::default(),
        position: Position::new(50_000.0, 0.15).unwrap(),
    }
}

pub fn sample_state(max_iterations: u32) -> CouncilState {
    CouncilState::new(sample_inputs(), max_iterations).unwrap()
}

/// One scripted agent reply
#[derive(Debug, Clone)]
pub enum Script {
    Submit(AgentSubmission),
    Fail(String),
    Panic,
}

/// Agent replying from a queue; the last entry repeats forever
pub struct ScriptedAgent {
    script: Mutex<VecDeque<Script>>,
    received: Mutex<Vec<AgentInput>>,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: Script) -> Self {
        Self::new(vec![reply])
    }

    pub fn received(&self) -> Vec<AgentInput> {
        self.received.lock().unwrap().clone()
    }

    fn next(&self) -> Script {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or(Script::Fail("script exhausted".to_string()))
        }
    }
}

#[async_trait]
impl CouncilAgent for ScriptedAgent {
    async fn evaluate(&self, input: AgentInput) -> Result<AgentSubmission, AgentError> {
        self.received.lock().unwrap().push(input);
        match self.next() {
            Script::Submit(submission) => Ok(submission),
            Script::Fail(message) => Err(AgentError::Failed(message)),
            Script::Panic => panic!("scripted panic"),
        }
    }
}

/// Reasoning service replying from a queue and recording prompts
pub struct ScriptedReasoning {
    replies: Mutex<VecDeque<Result<String, ReasoningError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedReasoning {
    pub fn new(replies: Vec<Result<String, ReasoningError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReasoningService for ScriptedReasoning {
    fn engine(&self) -> &str {
        "scripted"
    }

    async fn reason(&self, prompt: &str) -> Result<String, ReasoningError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ReasoningError::EmptyResponse))
    }
}

/// Data source knowing a single user and asset
pub struct FixedDataSource {
    pub user_id: String,
    pub asset_id: String,
}

impl FixedDataSource {
    pub fn new() -> Self {
        Self {
            user_id: "user_1".to_string(),
            asset_id: "AAPL_2026".to_string(),
        }
    }
}

#[async_trait]
impl CouncilDataSource for FixedDataSource {
    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, DataSourceError> {
        if user_id == self.user_id {
            Ok(UserProfile::default())
        } else {
            Err(DataSourceError::UserNotFound(user_id.to_string()))
        }
    }

    async fn asset_candidate(&self, asset_id: &str) -> Result<AssetCandidate, DataSourceError> {
        if asset_id == self.asset_id {
            Ok(AssetCandidate::new(asset_id, "Apple Inc."))
        } else {
            Err(DataSourceError::AssetNotFound(asset_id.to_string()))
        }
    }

    async fn market_context(&self) -> Result<MarketContext, DataSourceError> {
        Ok(MarketContext::default())
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn payloads(&self, event_type: &str) -> Vec<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == event_type)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

impl CouncilLogger for RecordingLogger {
    fn log(&self, event: CouncilEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub iterations: Mutex<Vec<u32>>,
    pub agents: Mutex<Vec<(AgentSlot, bool)>>,
    pub terminated: Mutex<Option<EvaluationResult>>,
}

impl CouncilProgress for RecordingProgress {
    fn on_iteration_start(&self, iteration: u32, _max_iterations: u32, _agents: usize) {
        self.iterations.lock().unwrap().push(iteration);
    }

    fn on_agent_complete(&self, slot: AgentSlot, accepted: bool) {
        self.agents.lock().unwrap().push((slot, accepted));
    }

    fn on_evaluation(&self, _iteration: u32, _result: &EvaluationResult) {}

    fn on_terminated(&self, result: &EvaluationResult) {
        *self.terminated.lock().unwrap() = Some(result.clone());
    }
}

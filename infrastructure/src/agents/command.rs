//! Subprocess council agents
//!
//! A [`CommandAgent`] runs an external program once per evaluation. The
//! projected input is written to its stdin as one JSON document; the
//! program answers with an `AgentSubmission` JSON document on stdout.
//! Anything on stderr is forwarded to the debug log.

use crate::config::AgentCommandSpec;
use async_trait::async_trait;
use council_application::{AgentError, CouncilAgent};
use council_domain::{AgentInput, AgentSlot, AgentSubmission};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Agent backed by an external program
#[derive(Debug, Clone)]
pub struct CommandAgent {
    slot: AgentSlot,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAgent {
    pub fn new(slot: AgentSlot, program: impl Into<String>) -> Self {
        Self {
            slot,
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_spec(spec: &AgentCommandSpec) -> Self {
        Self::new(spec.slot, spec.program.clone())
            .with_args(spec.args.clone())
            .with_timeout(Duration::from_secs(spec.timeout_secs))
    }

    pub fn slot(&self) -> AgentSlot {
        self.slot
    }

    async fn run(&self, payload: Vec<u8>) -> Result<std::process::Output, AgentError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AgentError::Spawn(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that exits without reading its input is not an error by itself
            if let Err(e) = stdin.write_all(&payload).await {
                debug!("[{}] stdin closed early: {}", self.slot, e);
            }
            drop(stdin);
        }

        child
            .wait_with_output()
            .await
            .map_err(|e| AgentError::Failed(format!("waiting for {}: {}", self.program, e)))
    }
}

#[async_trait]
impl CouncilAgent for CommandAgent {
    async fn evaluate(&self, input: AgentInput) -> Result<AgentSubmission, AgentError> {
        let payload = serde_json::to_vec(&input)
            .map_err(|e| AgentError::Failed(format!("encoding input: {}", e)))?;

        debug!("[{}] running {} {:?}", self.slot, self.program, self.args);
        let output = tokio::time::timeout(self.timeout, self.run(payload))
            .await
            .map_err(|_| AgentError::Timeout(self.timeout.as_secs()))??;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!("[{}] stderr: {}", self.slot, stderr.trim());
        }

        if !output.status.success() {
            warn!("[{}] {} exited with {}", self.slot, self.program, output.status);
            return Err(AgentError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_submission(&output.stdout)
    }
}

/// Decode stdout into a submission; validation happens in the council loop
fn parse_submission(stdout: &[u8]) -> Result<AgentSubmission, AgentError> {
    let text = String::from_utf8_lossy(stdout);
    if text.trim().is_empty() {
        return Err(AgentError::MalformedOutput("empty stdout".to_string()));
    }
    serde_json::from_str(text.trim()).map_err(|e| AgentError::MalformedOutput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::council::project;

    fn input() -> AgentInput {
        let state = council_domain::CouncilState::new(
            council_domain::CouncilInputs {
                user_profile: Default::default(),
                asset_candidate: council_domain::AssetCandidate::new("AAPL_2026", "Apple Inc."),
                market_context: Default::default(),
                position: council_domain::Position::new(10_000.0, 0.1).unwrap(),
            },
            3,
        )
        .unwrap();
        project(&state, AgentSlot::RiskQualification, &[])
    }

    #[test]
    fn test_parse_submission() {
        let stdout = br#"{"agent_name":"risk","verdict":"APPROVE","confidence":0.9,
            "key_findings":[],"blocking_issues":[],"recommendations":[],"metrics":{}}"#;
        let submission = parse_submission(stdout).unwrap();
        assert_eq!(submission.verdict.as_deref(), Some("APPROVE"));
        assert_eq!(submission.confidence, Some(0.9));
    }

    #[test]
    fn test_parse_submission_garbage() {
        assert!(matches!(
            parse_submission(b"   \n"),
            Err(AgentError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_submission(b"VERDICT: approve"),
            Err(AgentError::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let agent = CommandAgent::new(
            AgentSlot::RiskQualification,
            "/nonexistent/council-agent-binary",
        );
        let result = agent.evaluate(input()).await;
        assert!(matches!(result, Err(AgentError::Spawn(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_round_trip_through_shell() {
        let script = r#"cat > /dev/null; echo '{"agent_name":"risk","verdict":"MODIFY","confidence":0.6,"key_findings":["concentration"],"blocking_issues":[],"recommendations":["halve"],"metrics":{}}'"#;
        let agent = CommandAgent::new(AgentSlot::RiskQualification, "sh")
            .with_args(vec!["-c".to_string(), script.to_string()]);

        let submission = agent.evaluate(input()).await.unwrap();
        assert_eq!(submission.verdict.as_deref(), Some("MODIFY"));
        assert_eq!(submission.recommendations, Some(vec!["halve".to_string()]));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_input_reaches_stdin() {
        // Echo the slot field back as the agent name
        let script = r#"slot=$(sed -n 's/.*"slot":"\([a-z_]*\)".*/\1/p'); printf '{"agent_name":"%s","verdict":"APPROVE","confidence":1.0,"key_findings":[],"blocking_issues":[],"recommendations":[],"metrics":{}}' "$slot""#;
        let agent = CommandAgent::new(AgentSlot::RiskQualification, "sh")
            .with_args(vec!["-c".to_string(), script.to_string()]);

        let submission = agent.evaluate(input()).await.unwrap();
        assert_eq!(
            submission.agent_name.as_deref(),
            Some("risk_qualification")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit() {
        let agent = CommandAgent::new(AgentSlot::DevilsAdvocate, "sh")
            .with_args(vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()]);

        match agent.evaluate(input()).await {
            Err(AgentError::Failed(msg)) => assert!(msg.contains("boom")),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let agent = CommandAgent::new(AgentSlot::MarketAnalysis, "sleep")
            .with_args(vec!["5".to_string()])
            .with_timeout(Duration::from_millis(100));

        assert!(matches!(
            agent.evaluate(input()).await,
            Err(AgentError::Timeout(_))
        ));
    }
}

//! Agent output records
//!
//! [`AgentSubmission`] is what an agent hands back: untrusted, every field
//! optional. [`AgentOutput`] is what the council stores once a submission
//! passes [`validate_submission`](super::validation::validate_submission).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An agent's opinion on the proposed investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approve,
    Modify,
    Reject,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approve => "APPROVE",
            Verdict::Modify => "MODIFY",
            Verdict::Reject => "REJECT",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    /// Strict: only the upper-case wire values are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVE" => Ok(Verdict::Approve),
            "MODIFY" => Ok(Verdict::Modify),
            "REJECT" => Ok(Verdict::Reject),
            _ => Err(format!(
                "Illegal verdict: {}. Valid: APPROVE, MODIFY, REJECT",
                s
            )),
        }
    }
}

/// A validated agent output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub agent_name: String,
    pub verdict: Verdict,
    /// Always within [0.0, 1.0]
    pub confidence: f64,
    pub key_findings: Vec<String>,
    /// Empty means no blocking issue
    pub blocking_issues: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    /// Agent-specific figures, opaque to the council
    pub metrics: Map<String, Value>,
}

impl AgentOutput {
    pub fn new(agent_name: impl Into<String>, verdict: Verdict, confidence: f64) -> Self {
        Self {
            agent_name: agent_name.into(),
            verdict,
            confidence,
            key_findings: Vec::new(),
            blocking_issues: Vec::new(),
            recommendations: Vec::new(),
            reasoning: String::new(),
            metrics: Map::new(),
        }
    }

    pub fn with_finding(mut self, finding: impl Into<String>) -> Self {
        self.key_findings.push(finding.into());
        self
    }

    pub fn with_blocking_issue(mut self, issue: impl Into<String>) -> Self {
        self.blocking_issues.push(issue.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }

    pub fn has_blocking_issues(&self) -> bool {
        !self.blocking_issues.is_empty()
    }
}

/// Raw record returned across the agent boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSubmission {
    pub agent_name: Option<String>,
    pub verdict: Option<String>,
    pub confidence: Option<f64>,
    pub key_findings: Option<Vec<String>>,
    pub blocking_issues: Option<Vec<String>>,
    pub recommendations: Option<Vec<String>>,
    pub reasoning: Option<String>,
    pub metrics: Option<Value>,
}

impl From<AgentOutput> for AgentSubmission {
    fn from(output: AgentOutput) -> Self {
        Self {
            agent_name: Some(output.agent_name),
            verdict: Some(output.verdict.as_str().to_string()),
            confidence: Some(output.confidence),
            key_findings: Some(output.key_findings),
            blocking_issues: Some(output.blocking_issues),
            recommendations: Some(output.recommendations),
            reasoning: Some(output.reasoning),
            metrics: Some(Value::Object(output.metrics)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parsing_is_case_sensitive() {
        assert_eq!("MODIFY".parse::<Verdict>().unwrap(), Verdict::Modify);
        assert!("approve".parse::<Verdict>().is_err());
        assert!("MAYBE".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_output_builder() {
        let output = AgentOutput::new("risk", Verdict::Approve, 0.8)
            .with_finding("Diversified")
            .with_blocking_issue("Emergency fund too small")
            .with_metric("risk_score", 42);

        assert!(output.has_blocking_issues());
        assert_eq!(output.key_findings, vec!["Diversified"]);
        assert_eq!(output.metrics["risk_score"], 42);
    }

    #[test]
    fn test_submission_from_output_keeps_wire_verdict() {
        let submission = AgentSubmission::from(AgentOutput::new("a", Verdict::Reject, 0.4));
        assert_eq!(submission.verdict.as_deref(), Some("REJECT"));
        assert_eq!(submission.metrics, Some(Value::Object(Map::new())));
    }

    #[test]
    fn test_submission_tolerates_missing_fields() {
        let submission: AgentSubmission =
            serde_json::from_str(r#"{"verdict": "APPROVE"}"#).unwrap();
        assert_eq!(submission.verdict.as_deref(), Some("APPROVE"));
        assert!(submission.confidence.is_none());
    }
}

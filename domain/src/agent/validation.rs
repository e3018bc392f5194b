//! Output validation at the agent boundary.
//!
//! A submission either becomes a typed [`AgentOutput`] or is rejected with
//! every violation found. Rejection is never fatal to the run; the caller
//! logs it and treats the agent as silent for the round.

use super::output::{AgentOutput, AgentSubmission, Verdict};
use serde_json::Value;
use thiserror::Error;

/// One reason a submission was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutputViolation {
    #[error("missing mandatory field '{0}'")]
    MissingField(&'static str),

    #[error("illegal verdict '{0}' (expected APPROVE, MODIFY or REJECT)")]
    IllegalVerdict(String),

    #[error("confidence {0} is outside [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),

    #[error("metrics must be a JSON object")]
    MetricsNotObject,
}

/// Validate a submission against the output contract.
///
/// `reasoning` is the only optional field; it defaults to an empty string.
pub fn validate_submission(
    submission: AgentSubmission,
) -> Result<AgentOutput, Vec<OutputViolation>> {
    let mut violations = Vec::new();

    if submission.agent_name.is_none() {
        violations.push(OutputViolation::MissingField("agent_name"));
    }

    let verdict = match submission.verdict.as_deref() {
        None => {
            violations.push(OutputViolation::MissingField("verdict"));
            None
        }
        Some(raw) => match raw.parse::<Verdict>() {
            Ok(v) => Some(v),
            Err(_) => {
                violations.push(OutputViolation::IllegalVerdict(raw.to_string()));
                None
            }
        },
    };

    match submission.confidence {
        None => violations.push(OutputViolation::MissingField("confidence")),
        // NaN fails the range check as well
        Some(c) if !(0.0..=1.0).contains(&c) => {
            violations.push(OutputViolation::ConfidenceOutOfRange(c))
        }
        Some(_) => {}
    }

    if submission.key_findings.is_none() {
        violations.push(OutputViolation::MissingField("key_findings"));
    }
    if submission.blocking_issues.is_none() {
        violations.push(OutputViolation::MissingField("blocking_issues"));
    }
    if submission.recommendations.is_none() {
        violations.push(OutputViolation::MissingField("recommendations"));
    }

    let metrics = match submission.metrics {
        None => {
            violations.push(OutputViolation::MissingField("metrics"));
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            violations.push(OutputViolation::MetricsNotObject);
            None
        }
    };

    if !violations.is_empty() {
        return Err(violations);
    }

    match (
        submission.agent_name,
        verdict,
        submission.confidence,
        submission.key_findings,
        submission.blocking_issues,
        submission.recommendations,
        metrics,
    ) {
        (
            Some(agent_name),
            Some(verdict),
            Some(confidence),
            Some(key_findings),
            Some(blocking_issues),
            Some(recommendations),
            Some(metrics),
        ) => Ok(AgentOutput {
            agent_name,
            verdict,
            confidence,
            key_findings,
            blocking_issues,
            recommendations,
            reasoning: submission.reasoning.unwrap_or_default(),
            metrics,
        }),
        // Every None was recorded as a violation above
        _ => Err(violations),
    }
}

/// Check a submission without consuming it
pub fn is_valid(submission: &AgentSubmission) -> bool {
    validate_submission(submission.clone()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> AgentSubmission {
        serde_json::from_value(json!({
            "agent_name": "risk_qualification",
            "verdict": "APPROVE",
            "confidence": 0.85,
            "key_findings": ["Stable income"],
            "blocking_issues": [],
            "recommendations": [],
            "metrics": {"risk_score": 35}
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_submission_passes() {
        let output = validate_submission(complete()).unwrap();
        assert_eq!(output.verdict, Verdict::Approve);
        assert_eq!(output.reasoning, "");
        assert_eq!(output.metrics["risk_score"], 35);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let mut submission = complete();
        submission.key_findings = None;
        submission.metrics = None;

        let violations = validate_submission(submission).unwrap_err();
        assert_eq!(
            violations,
            vec![
                OutputViolation::MissingField("key_findings"),
                OutputViolation::MissingField("metrics"),
            ]
        );
    }

    #[test]
    fn test_lowercase_verdict_rejected() {
        let mut submission = complete();
        submission.verdict = Some("approve".to_string());

        let violations = validate_submission(submission).unwrap_err();
        assert_eq!(
            violations,
            vec![OutputViolation::IllegalVerdict("approve".to_string())]
        );
    }

    #[test]
    fn test_confidence_bounds() {
        for bad in [1.2, -0.1, f64::NAN, f64::INFINITY] {
            let mut submission = complete();
            submission.confidence = Some(bad);
            assert!(!is_valid(&submission), "confidence {} accepted", bad);
        }

        for good in [0.0, 1.0] {
            let mut submission = complete();
            submission.confidence = Some(good);
            assert!(is_valid(&submission));
        }
    }

    #[test]
    fn test_metrics_must_be_object() {
        let mut submission = complete();
        submission.metrics = Some(json!([1, 2, 3]));

        let violations = validate_submission(submission).unwrap_err();
        assert_eq!(violations, vec![OutputViolation::MetricsNotObject]);
    }

    #[test]
    fn test_reasoning_is_kept() {
        let mut submission = complete();
        submission.reasoning = Some("Long narrative".to_string());
        assert_eq!(
            validate_submission(submission).unwrap().reasoning,
            "Long narrative"
        );
    }
}

//! Reasoning-service response parsing.
//!
//! Pure text handling: the service returns free-form completion text that
//! should contain one JSON object. These functions find that object and turn
//! it into typed values. No I/O.
//!
//! | Function | Use Case | Failure |
//! |----------|----------|---------|
//! | [`parse_service_verdict`] | Consensus decision | `Err`, caller falls back to rules |
//! | [`parse_structured_response`] | Modification synthesis | never; raw text is kept |

use super::evaluation::CouncilAction;
use serde_json::Value;
use thiserror::Error;

/// Reason recorded when the service omits one
pub const DEFAULT_SERVICE_REASON: &str = "AI_EVALUATION";

/// Decision extracted from a service response
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceVerdict {
    pub action: CouncilAction,
    pub reason: String,
    pub rationale: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseParseError {
    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("response JSON is malformed: {0}")]
    MalformedJson(String),

    #[error("response JSON has no 'action' field")]
    MissingAction,
}

/// Slice from the first `{` to the last `}`, if any.
///
/// ```
/// use council_domain::council::parsing::extract_json_object;
///
/// let text = "Sure! {\"action\": \"TERMINATE\"} Hope that helps.";
/// assert_eq!(extract_json_object(text), Some("{\"action\": \"TERMINATE\"}"));
/// assert_eq!(extract_json_object("no json"), None);
/// ```
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text[start..].rfind('}')?;
    Some(&text[start..start + end + 1])
}

/// Parse a consensus decision.
///
/// The action is case-normalized and anything other than TERMINATE becomes
/// REITERATE. A missing `reason` becomes [`DEFAULT_SERVICE_REASON`]; a missing
/// rationale (`reasoning` or `ai_reasoning`) falls back to the full text.
pub fn parse_service_verdict(text: &str) -> Result<ServiceVerdict, ResponseParseError> {
    let json_str = extract_json_object(text).ok_or(ResponseParseError::NoJsonObject)?;
    let parsed: Value = serde_json::from_str(json_str)
        .map_err(|e| ResponseParseError::MalformedJson(e.to_string()))?;

    let action = parsed
        .get("action")
        .and_then(|v| v.as_str())
        .map(CouncilAction::from_lenient)
        .ok_or(ResponseParseError::MissingAction)?;

    let reason = parsed
        .get("reason")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SERVICE_REASON)
        .to_string();

    let rationale = ["reasoning", "ai_reasoning"]
        .iter()
        .find_map(|key| parsed.get(*key).and_then(|v| v.as_str()))
        .unwrap_or(text)
        .to_string();

    Ok(ServiceVerdict {
        action,
        reason,
        rationale,
    })
}

/// Parse a free-form structured response, keeping raw text when no JSON is found
pub fn parse_structured_response(text: &str) -> Value {
    extract_json_object(text)
        .and_then(|json_str| serde_json::from_str(json_str).ok())
        .unwrap_or_else(|| Value::String(text.to_string()))
}

//! Structured configuration issues.
//!
//! Configuration checks never fail fast; they return every problem they find
//! as a [`ConfigIssue`] so the caller can report all of them at once and
//! decide whether to abort (any [`Severity::Error`]) or continue with
//! warnings.
//!
//! # Examples
//!
//! ```
//! use council_domain::config::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issues = vec![ConfigIssue::warning(
//!     ConfigIssueCode::ReasoningWithoutEngine,
//!     "strategy is 'reasoning' but no engine is configured",
//! )];
//! assert!(!ConfigIssue::has_errors(&issues));
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `max_iterations` is zero.
    InvalidMaxIterations,
    /// Confidence threshold outside [0, 1].
    ThresholdOutOfRange,
    /// A string field holds a value outside its allowed set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// Reasoning strategy selected but no engine configured; rules will run.
    ReasoningWithoutEngine,
    /// Key in `[agents.*]` does not name an agent slot.
    UnknownAgentSlot { key: String },
    /// Manifest entry names a field that does not exist.
    UnknownInputField { slot: String, value: String },
    /// An agent declares its own output as an input.
    SelfReferencingInput,
    /// Subprocess agent has an empty command line.
    EmptyAgentCommand { slot: String },
    /// Timeout of zero seconds.
    InvalidTimeout { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

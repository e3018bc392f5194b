//! Reasoning engine configuration from TOML (`[reasoning]` section)

use crate::reasoning::EngineKind;
use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw reasoning engine configuration from TOML
///
/// Leaving `engine` empty disables the reasoning service entirely; the
/// council then always decides with the rule cascade and skips synthesis.
///
/// # Example
///
/// ```toml
/// [reasoning]
/// engine = "openai"          # "", "openai" or "gemini"
/// model = "gpt-4"            # engine default when omitted
/// api_key_env = "OPENAI_API_KEY"
/// timeout_secs = 60
/// temperature = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    pub engine: String,
    /// Model name; falls back to the engine's default
    pub model: Option<String>,
    /// API base URL; falls back to the engine's public endpoint
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub temperature: f64,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            engine: String::new(),
            model: None,
            base_url: None,
            api_key_env: None,
            api_key: None,
            timeout_secs: 60,
            temperature: 0.0,
        }
    }
}

impl FileReasoningConfig {
    /// Parse the engine name. Empty means "no engine"; unknown names are errors.
    pub fn parse_engine(&self) -> (Option<EngineKind>, Vec<ConfigIssue>) {
        let raw = self.engine.trim();
        if raw.is_empty() {
            return (None, vec![]);
        }
        match raw.parse::<EngineKind>() {
            Ok(kind) => (Some(kind), vec![]),
            Err(e) => {
                let issue = ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "reasoning.engine".to_string(),
                        value: self.engine.clone(),
                        valid_values: EngineKind::ALL
                            .iter()
                            .map(|k| k.as_str().to_string())
                            .collect(),
                    },
                    message: format!("reasoning.engine: {}", e),
                };
                (None, vec![issue])
            }
        }
    }

    /// Check request settings that would make every call fail.
    pub fn validate_request(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidTimeout {
                    field: "reasoning.timeout_secs".to_string(),
                },
                "reasoning.timeout_secs cannot be 0",
            ));
        }
        issues
    }
}

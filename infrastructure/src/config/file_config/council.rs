//! Council loop configuration from TOML (`[council]` section)

use council_application::ConsensusStrategy;
use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw council configuration from TOML
///
/// # Example
///
/// ```toml
/// [council]
/// max_iterations = 5
/// confidence_threshold = 0.75
/// strategy = "rules"          # "rules" or "reasoning"
/// parallel_agents = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Hard bound on deliberation rounds
    pub max_iterations: u32,
    /// Mean confidence required for rules-based consensus
    pub confidence_threshold: f64,
    /// Consensus strategy: "rules" or "reasoning"
    pub strategy: String,
    /// Invoke agents concurrently
    pub parallel_agents: bool,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            confidence_threshold: council_domain::council::DEFAULT_CONFIDENCE_THRESHOLD,
            strategy: "rules".to_string(),
            parallel_agents: true,
        }
    }
}

impl FileCouncilConfig {
    /// Parse strategy string into ConsensusStrategy, returning warnings on failure.
    pub fn parse_strategy(&self) -> (ConsensusStrategy, Vec<ConfigIssue>) {
        match self.strategy.parse::<ConsensusStrategy>() {
            Ok(strategy) => (strategy, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "council.strategy".to_string(),
                        value: self.strategy.clone(),
                        valid_values: vec!["rules".to_string(), "reasoning".to_string()],
                    },
                    message: format!(
                        "council.strategy: unknown value '{}', falling back to 'rules'",
                        self.strategy
                    ),
                };
                (ConsensusStrategy::default(), vec![issue])
            }
        }
    }
}

//! Council parameters: orchestration loop control.
//!
//! [`CouncilParams`] groups the static parameters that control
//! [`RunCouncilUseCase`](crate::use_cases::run_council::RunCouncilUseCase).
//! Built once at startup and passed into the use case builder.

use council_domain::{ConfigIssue, ConfigIssueCode, ConsensusRules, InputManifest};
use serde::{Deserialize, Serialize};

/// Which evaluator decides consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusStrategy {
    /// Deterministic rule cascade
    #[default]
    Rules,
    /// External reasoning service with rules fallback
    Reasoning,
}

impl ConsensusStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusStrategy::Rules => "rules",
            ConsensusStrategy::Reasoning => "reasoning",
        }
    }
}

impl std::fmt::Display for ConsensusStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConsensusStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rules" => Ok(ConsensusStrategy::Rules),
            "reasoning" | "ai" => Ok(ConsensusStrategy::Reasoning),
            _ => Err(format!("Unknown strategy: {}. Valid: rules, reasoning", s)),
        }
    }
}

/// Orchestration loop parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CouncilParams {
    /// Hard bound on loop passes.
    pub max_iterations: u32,
    /// Mean confidence needed for rules-based consensus.
    pub confidence_threshold: f64,
    pub strategy: ConsensusStrategy,
    /// Run agents on parallel tasks instead of one after another.
    pub parallel_agents: bool,
    pub manifest: InputManifest,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            confidence_threshold: council_domain::council::DEFAULT_CONFIDENCE_THRESHOLD,
            strategy: ConsensusStrategy::Rules,
            parallel_agents: true,
            manifest: InputManifest::default(),
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: ConsensusStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel_agents(mut self, parallel: bool) -> Self {
        self.parallel_agents = parallel;
        self
    }

    pub fn with_manifest(mut self, manifest: InputManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn rules(&self) -> ConsensusRules {
        ConsensusRules::new(self.confidence_threshold)
    }

    /// Check loop bounds and the manifest
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.max_iterations == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidMaxIterations,
                "max_iterations must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ThresholdOutOfRange,
                format!(
                    "confidence_threshold must be within [0, 1], got {}",
                    self.confidence_threshold
                ),
            ));
        }
        issues.extend(self.manifest.validate());
        issues
    }
}

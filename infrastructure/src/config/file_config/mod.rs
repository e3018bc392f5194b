//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! String-typed fields are parsed into domain/application types through
//! `parse_*` methods that return the value together with any issues found.

mod agents;
mod council;
mod data;
mod reasoning;

pub use agents::{AgentCommandSpec, FileAgentCommand, FileAgentsConfig};
pub use council::FileCouncilConfig;
pub use data::{FileDataConfig, FileLoggingConfig};
pub use reasoning::FileReasoningConfig;

use council_application::{ConsensusStrategy, CouncilParams};
use council_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Loop bounds and consensus strategy
    pub council: FileCouncilConfig,
    /// External reasoning engine
    pub reasoning: FileReasoningConfig,
    /// Manifest overrides and subprocess agents
    pub agents: FileAgentsConfig,
    /// Record source
    pub data: FileDataConfig,
    /// Audit trail
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Loop bounds and manifest (via [`CouncilParams::validate`])
    /// 2. Enum parse failures (strategy, engine)
    /// 3. Agent command tables
    /// 4. Reasoning strategy without an engine
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (params, mut issues) = self.council_params();
        issues.extend(params.validate());

        let (engine, engine_issues) = self.reasoning.parse_engine();
        issues.extend(engine_issues);
        if engine.is_some() {
            issues.extend(self.reasoning.validate_request());
        }

        issues.extend(self.agents.parse_commands().1);

        if params.strategy == ConsensusStrategy::Reasoning
            && self.reasoning.engine.trim().is_empty()
        {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ReasoningWithoutEngine,
                message: "council.strategy is 'reasoning' but no reasoning.engine is set; \
                          the rule cascade will decide"
                    .to_string(),
            });
        }

        issues
    }

    /// Build the orchestration parameters, collecting parse issues.
    ///
    /// Range checks are left to [`CouncilParams::validate`] so that CLI
    /// overrides can be applied before validating.
    pub fn council_params(&self) -> (CouncilParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (strategy, strategy_issues) = self.council.parse_strategy();
        issues.extend(strategy_issues);
        let (manifest, manifest_issues) = self.agents.parse_manifest();
        issues.extend(manifest_issues);

        let params = CouncilParams::default()
            .with_max_iterations(self.council.max_iterations)
            .with_confidence_threshold(self.council.confidence_threshold)
            .with_strategy(strategy)
            .with_parallel_agents(self.council.parallel_agents)
            .with_manifest(manifest);

        (params, issues)
    }
}

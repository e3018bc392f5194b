//! Agent configuration from TOML (`[agents]` section)
//!
//! Two tables live here: manifest overrides (`[agents.inputs]`) and the
//! subprocess agents that fill each slot (`[agents.commands.<slot>]`).

use council_domain::{AgentSlot, ConfigIssue, ConfigIssueCode, InputField, InputManifest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw agents configuration from TOML
///
/// # Example
///
/// ```toml
/// [agents.inputs]
/// devils_advocate = ["asset_candidate", "market_context", "risk_qualification", "iteration"]
///
/// [agents.commands.risk_qualification]
/// program = "python3"
/// args = ["-m", "agents.risk"]
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentsConfig {
    /// Per-slot input declarations replacing the built-in manifest entry
    pub inputs: BTreeMap<String, Vec<String>>,
    /// Subprocess agents keyed by slot name
    pub commands: BTreeMap<String, FileAgentCommand>,
}

/// One subprocess agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FileAgentCommand {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            timeout_secs: 120,
        }
    }
}

/// Command ready to be spawned for a slot
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCommandSpec {
    pub slot: AgentSlot,
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

fn unknown_slot(section: &str, key: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::UnknownAgentSlot {
            key: key.to_string(),
        },
        format!(
            "agents.{}.{}: not an agent slot (valid: {})",
            section,
            key,
            AgentSlot::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    )
}

impl FileAgentsConfig {
    /// Apply `[agents.inputs]` on top of the default manifest.
    ///
    /// Unknown slots and unknown field names are errors; the offending entry
    /// is skipped so that every problem is reported in one pass.
    pub fn parse_manifest(&self) -> (InputManifest, Vec<ConfigIssue>) {
        let mut manifest = InputManifest::default();
        let mut issues = Vec::new();

        for (key, raw_fields) in &self.inputs {
            let Ok(slot) = key.parse::<AgentSlot>() else {
                issues.push(unknown_slot("inputs", key));
                continue;
            };

            let mut fields = Vec::with_capacity(raw_fields.len());
            let mut ok = true;
            for raw in raw_fields {
                match raw.parse::<InputField>() {
                    Ok(field) => fields.push(field),
                    Err(e) => {
                        ok = false;
                        issues.push(ConfigIssue::error(
                            ConfigIssueCode::UnknownInputField {
                                slot: key.clone(),
                                value: raw.clone(),
                            },
                            format!("agents.inputs.{}: {}", key, e),
                        ));
                    }
                }
            }
            if ok {
                manifest = manifest.with_fields(slot, fields);
            }
        }

        issues.extend(manifest.validate());
        (manifest, issues)
    }

    /// Resolve `[agents.commands]` into spawnable specs, in slot order.
    pub fn parse_commands(&self) -> (Vec<AgentCommandSpec>, Vec<ConfigIssue>) {
        let mut specs = Vec::new();
        let mut issues = Vec::new();

        for (key, command) in &self.commands {
            let Ok(slot) = key.parse::<AgentSlot>() else {
                issues.push(unknown_slot("commands", key));
                continue;
            };
            if command.program.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyAgentCommand { slot: key.clone() },
                    format!("agents.commands.{}: program cannot be empty", key),
                ));
                continue;
            }
            if command.timeout_secs == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidTimeout {
                        field: format!("agents.commands.{}.timeout_secs", key),
                    },
                    format!("agents.commands.{}: timeout_secs cannot be 0", key),
                ));
                continue;
            }
            specs.push(AgentCommandSpec {
                slot,
                program: command.program.clone(),
                args: command.args.clone(),
                timeout_secs: command.timeout_secs,
            });
        }

        specs.sort_by_key(|spec| spec.slot);
        (specs, issues)
    }
}

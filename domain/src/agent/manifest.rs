//! Input manifests
//!
//! Each agent declares the state fields it may read. The manifest is static
//! configuration; [`project`](crate::council::projection::project) enforces
//! it when building an agent's input.

use super::slot::AgentSlot;
use crate::config::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A readable piece of council state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputField {
    UserProfile,
    AssetCandidate,
    MarketContext,
    Position,
    Iteration,
    PendingModifications,
    /// Another agent's latest output
    PeerOutput(AgentSlot),
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputField::UserProfile => write!(f, "user_profile"),
            InputField::AssetCandidate => write!(f, "asset_candidate"),
            InputField::MarketContext => write!(f, "market_context"),
            InputField::Position => write!(f, "position"),
            InputField::Iteration => write!(f, "iteration"),
            InputField::PendingModifications => write!(f, "pending_modifications"),
            InputField::PeerOutput(slot) => write!(f, "{}", slot.as_str()),
        }
    }
}

impl std::str::FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user_profile" => Ok(InputField::UserProfile),
            "asset_candidate" => Ok(InputField::AssetCandidate),
            "market_context" => Ok(InputField::MarketContext),
            "position" => Ok(InputField::Position),
            "iteration" => Ok(InputField::Iteration),
            "pending_modifications" => Ok(InputField::PendingModifications),
            other => other
                .parse::<AgentSlot>()
                .map(InputField::PeerOutput)
                .map_err(|_| {
                    format!(
                        "Unknown input field: {}. Valid: user_profile, asset_candidate, \
                         market_context, position, iteration, pending_modifications, \
                         or an agent slot name",
                        s
                    )
                }),
        }
    }
}

impl Serialize for InputField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InputField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-slot declared input fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputManifest {
    fields: BTreeMap<AgentSlot, Vec<InputField>>,
}

impl Default for InputManifest {
    fn default() -> Self {
        use InputField::*;

        let mut fields = BTreeMap::new();
        fields.insert(
            AgentSlot::RiskQualification,
            vec![UserProfile, AssetCandidate, MarketContext, Position],
        );
        fields.insert(
            AgentSlot::DevilsAdvocate,
            vec![
                AssetCandidate,
                MarketContext,
                PeerOutput(AgentSlot::RiskQualification),
            ],
        );
        fields.insert(
            AgentSlot::PersonalSuitability,
            vec![UserProfile, AssetCandidate, Position],
        );
        fields.insert(AgentSlot::MarketAnalysis, vec![AssetCandidate, MarketContext]);
        fields.insert(
            AgentSlot::FeasibilityAnalysis,
            vec![UserProfile, AssetCandidate, Position],
        );
        Self { fields }
    }
}

impl InputManifest {
    /// A manifest with no declarations
    pub fn empty() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Replace the declaration for one slot
    pub fn with_fields(mut self, slot: AgentSlot, fields: Vec<InputField>) -> Self {
        self.fields.insert(slot, fields);
        self
    }

    /// Declared fields for `slot`; empty when the slot declares nothing
    pub fn fields_for(&self, slot: AgentSlot) -> &[InputField] {
        self.fields.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentSlot, &Vec<InputField>)> {
        self.fields.iter()
    }

    /// Report declarations that cannot work as written
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (slot, fields) in &self.fields {
            if fields.contains(&InputField::PeerOutput(*slot)) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::SelfReferencingInput,
                    format!(
                        "{} declares its own output as an input; it will see its previous round",
                        slot
                    ),
                ));
            }
        }
        issues
    }
}

//! Agent slots
//!
//! The council has a fixed set of seats. Each registered agent occupies one
//! seat, and everything keyed by agent (outputs, manifests, history) is keyed
//! by [`AgentSlot`] so the set is checked exhaustively at compile time.

use serde::{Deserialize, Serialize};

/// A seat on the council.
///
/// Ordering follows declaration order, which is also the invocation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentSlot {
    RiskQualification,
    DevilsAdvocate,
    PersonalSuitability,
    MarketAnalysis,
    FeasibilityAnalysis,
}

impl AgentSlot {
    /// Every slot in invocation order
    pub const ALL: [AgentSlot; 5] = [
        AgentSlot::RiskQualification,
        AgentSlot::DevilsAdvocate,
        AgentSlot::PersonalSuitability,
        AgentSlot::MarketAnalysis,
        AgentSlot::FeasibilityAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentSlot::RiskQualification => "risk_qualification",
            AgentSlot::DevilsAdvocate => "devils_advocate",
            AgentSlot::PersonalSuitability => "personal_suitability",
            AgentSlot::MarketAnalysis => "market_analysis",
            AgentSlot::FeasibilityAnalysis => "feasibility_analysis",
        }
    }

    /// Human-readable name for console output
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentSlot::RiskQualification => "Risk Qualification",
            AgentSlot::DevilsAdvocate => "Devil's Advocate",
            AgentSlot::PersonalSuitability => "Personal Suitability",
            AgentSlot::MarketAnalysis => "Market Analysis",
            AgentSlot::FeasibilityAnalysis => "Feasibility Analysis",
        }
    }
}

impl std::fmt::Display for AgentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                format!(
                    "Unknown agent slot: {}. Valid: {}",
                    s,
                    AgentSlot::ALL
                        .iter()
                        .map(|slot| slot.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot() {
        assert_eq!(
            "devils_advocate".parse::<AgentSlot>().unwrap(),
            AgentSlot::DevilsAdvocate
        );
        assert_eq!(
            " Market_Analysis ".parse::<AgentSlot>().unwrap(),
            AgentSlot::MarketAnalysis
        );
        let err = "oracle".parse::<AgentSlot>().unwrap_err();
        assert!(err.contains("risk_qualification"));
    }

    #[test]
    fn test_order_matches_all() {
        let mut sorted = AgentSlot::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, AgentSlot::ALL.to_vec());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AgentSlot::FeasibilityAnalysis).unwrap();
        assert_eq!(json, r#""feasibility_analysis""#);
    }
}

//! User investment profile
//!
//! The profile is looked up once per council run and never mutated afterwards.
//! Every field has a default so partially filled documents still load.

use serde::{Deserialize, Serialize};

/// Three-step risk scale shared by risk tolerance and macro risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal tags attached to a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialGoal {
    Wealth,
    Retirement,
    Income,
    CapitalPreservation,
}

impl FinancialGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialGoal::Wealth => "WEALTH",
            FinancialGoal::Retirement => "RETIREMENT",
            FinancialGoal::Income => "INCOME",
            FinancialGoal::CapitalPreservation => "CAPITAL_PRESERVATION",
        }
    }
}

impl std::fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing holding in the user's portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Holding identifier (e.g. "US_STOCKS_INDEX")
    pub name: String,
    /// Share of the portfolio in percent
    #[serde(default)]
    pub allocation_pct: f64,
}

impl Holding {
    pub fn new(name: impl Into<String>, allocation_pct: f64) -> Self {
        Self {
            name: name.into(),
            allocation_pct,
        }
    }
}

/// User investment profile and constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub total_savings: f64,
    pub existing_investments: Vec<Holding>,
    pub risk_tolerance: RiskLevel,
    pub investment_horizon_months: u32,
    pub financial_goals: Vec<FinancialGoal>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            monthly_expenses: 0.0,
            total_savings: 0.0,
            existing_investments: Vec::new(),
            risk_tolerance: RiskLevel::Medium,
            investment_horizon_months: 60,
            financial_goals: Vec::new(),
        }
    }
}

impl UserProfile {
    pub fn with_risk_tolerance(mut self, risk: RiskLevel) -> Self {
        self.risk_tolerance = risk;
        self
    }

    pub fn with_horizon_months(mut self, months: u32) -> Self {
        self.investment_horizon_months = months;
        self
    }

    pub fn with_goal(mut self, goal: FinancialGoal) -> Self {
        self.financial_goals.push(goal);
        self
    }

    pub fn with_holding(mut self, holding: Holding) -> Self {
        self.existing_investments.push(holding);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_fills_defaults() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"monthly_income": 8000, "risk_tolerance": "HIGH"}"#).unwrap();

        assert_eq!(profile.monthly_income, 8000.0);
        assert_eq!(profile.risk_tolerance, RiskLevel::High);
        assert_eq!(profile.investment_horizon_months, 60);
        assert!(profile.existing_investments.is_empty());
    }

    #[test]
    fn test_goal_serialization() {
        let json = serde_json::to_string(&FinancialGoal::CapitalPreservation).unwrap();
        assert_eq!(json, r#""CAPITAL_PRESERVATION""#);
    }

    #[test]
    fn test_builder() {
        let profile = UserProfile::default()
            .with_risk_tolerance(RiskLevel::Low)
            .with_horizon_months(120)
            .with_goal(FinancialGoal::Retirement)
            .with_holding(Holding::new("CASH", 20.0));

        assert_eq!(profile.risk_tolerance, RiskLevel::Low);
        assert_eq!(profile.investment_horizon_months, 120);
        assert_eq!(profile.financial_goals, vec![FinancialGoal::Retirement]);
        assert_eq!(profile.existing_investments[0].name, "CASH");
    }
}

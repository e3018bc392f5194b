//! Market snapshot and position sizing

use super::profile::RiskLevel;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketTrend {
    Bull,
    Bear,
    #[default]
    Sideways,
}

impl MarketTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketTrend::Bull => "BULL",
            MarketTrend::Bear => "BEAR",
            MarketTrend::Sideways => "SIDEWAYS",
        }
    }
}

impl std::fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateRegime {
    Rising,
    #[default]
    Stable,
    Falling,
}

impl RateRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateRegime::Rising => "RISING",
            RateRegime::Stable => "STABLE",
            RateRegime::Falling => "FALLING",
        }
    }
}

impl std::fmt::Display for RateRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current market conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketContext {
    pub market_trend: MarketTrend,
    pub volatility_index: f64,
    pub interest_rate_regime: RateRegime,
    pub macro_risk_level: RiskLevel,
}

impl Default for MarketContext {
    fn default() -> Self {
        Self {
            market_trend: MarketTrend::Sideways,
            volatility_index: 20.0,
            interest_rate_regime: RateRegime::Stable,
            macro_risk_level: RiskLevel::Medium,
        }
    }
}

/// Proposed position size, derived from the request rather than looked up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub proposed_investment_amount: f64,
    /// Fraction of the total portfolio (0.15 = 15%)
    pub percentage_of_portfolio: f64,
}

impl Position {
    /// Create a position, rejecting negative or non-finite figures
    pub fn new(amount: f64, percentage_of_portfolio: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidPosition(format!(
                "proposed amount must be a non-negative number, got {}",
                amount
            )));
        }
        if !percentage_of_portfolio.is_finite() || percentage_of_portfolio < 0.0 {
            return Err(DomainError::InvalidPosition(format!(
                "portfolio share must be a non-negative number, got {}",
                percentage_of_portfolio
            )));
        }
        Ok(Self {
            proposed_investment_amount: amount,
            percentage_of_portfolio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_defaults() {
        let market: MarketContext = serde_json::from_str("{}").unwrap();
        assert_eq!(market.market_trend, MarketTrend::Sideways);
        assert_eq!(market.volatility_index, 20.0);
        assert_eq!(market.interest_rate_regime, RateRegime::Stable);
        assert_eq!(market.macro_risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::new(50_000.0, 0.15).is_ok());
        assert!(Position::new(-1.0, 0.15).is_err());
        assert!(Position::new(100.0, f64::NAN).is_err());
    }
}

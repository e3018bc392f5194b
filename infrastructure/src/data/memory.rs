//! In-memory data source

use async_trait::async_trait;
use council_application::{CouncilDataSource, DataSourceError};
use council_domain::{
    AssetCandidate, AssetType, FinancialGoal, Holding, LiquidityClass, MarketContext,
    MarketTrend, RateRegime, RiskLevel, UserProfile,
};
use std::collections::HashMap;

/// Records held in memory; used for demos and when no document file is configured
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    users: HashMap<String, UserProfile>,
    assets: HashMap<String, AssetCandidate>,
    market: Option<MarketContext>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>, profile: UserProfile) -> Self {
        self.users.insert(user_id.into(), profile);
        self
    }

    pub fn with_asset(mut self, asset: AssetCandidate) -> Self {
        self.assets.insert(asset.asset_id.clone(), asset);
        self
    }

    pub fn with_market(mut self, market: MarketContext) -> Self {
        self.market = Some(market);
        self
    }

    /// Sample household, Apple stock and a calm bull market
    pub fn sample() -> Self {
        let profile = UserProfile {
            monthly_income: 8000.0,
            monthly_expenses: 3500.0,
            total_savings: 250_000.0,
            ..UserProfile::default()
        }
        .with_holding(Holding::new("US_STOCKS_INDEX", 50.0))
        .with_holding(Holding::new("INT_BONDS", 30.0))
        .with_holding(Holding::new("CASH", 20.0))
        .with_risk_tolerance(RiskLevel::Medium)
        .with_horizon_months(120)
        .with_goal(FinancialGoal::Wealth)
        .with_goal(FinancialGoal::Retirement);

        let asset = AssetCandidate::new("AAPL_2026", "Apple Inc.")
            .with_type(AssetType::Stock)
            .with_sector("TECHNOLOGY")
            .with_region("US")
            .with_liquidity(LiquidityClass::High)
            .with_expected_return(8.5);

        let market = MarketContext {
            market_trend: MarketTrend::Bull,
            volatility_index: 16.5,
            interest_rate_regime: RateRegime::Stable,
            macro_risk_level: RiskLevel::Low,
        };

        Self::new()
            .with_user("user_1", profile)
            .with_asset(asset)
            .with_market(market)
    }
}

#[async_trait]
impl CouncilDataSource for InMemoryDataSource {
    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, DataSourceError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| DataSourceError::UserNotFound(user_id.to_string()))
    }

    async fn asset_candidate(&self, asset_id: &str) -> Result<AssetCandidate, DataSourceError> {
        self.assets
            .get(asset_id)
            .cloned()
            .ok_or_else(|| DataSourceError::AssetNotFound(asset_id.to_string()))
    }

    async fn market_context(&self) -> Result<MarketContext, DataSourceError> {
        self.market.clone().ok_or(DataSourceError::NoMarketSnapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_records() {
        let source = InMemoryDataSource::sample();

        let user = source.user_profile("user_1").await.unwrap();
        assert_eq!(user.existing_investments.len(), 3);
        assert_eq!(user.investment_horizon_months, 120);

        let asset = source.asset_candidate("AAPL_2026").await.unwrap();
        assert_eq!(asset.liquidity_class, LiquidityClass::High);

        let market = source.market_context().await.unwrap();
        assert_eq!(market.market_trend, MarketTrend::Bull);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let source = InMemoryDataSource::new();
        assert!(source.user_profile("user_1").await.is_err());
        assert!(matches!(
            source.market_context().await,
            Err(DataSourceError::NoMarketSnapshot)
        ));
    }
}

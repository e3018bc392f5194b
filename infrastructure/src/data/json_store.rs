//! JSON document store
//!
//! Reads one JSON file holding three collections:
//!
//! ```json
//! {
//!   "users":  { "user_1": { "monthly_income": 8000, "risk_tolerance": "MEDIUM" } },
//!   "assets": { "AAPL_2026": { "asset_name": "Apple Inc.", "asset_type": "STOCK" } },
//!   "market": [ { "timestamp": "2026-01-05T09:00:00Z", "market_trend": "BULL" } ]
//! }
//! ```
//!
//! Missing optional fields take the record defaults. The market collection
//! is a series of snapshots; the one with the latest timestamp wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use council_application::{CouncilDataSource, DataSourceError};
use council_domain::{AssetCandidate, MarketContext, UserProfile};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
struct MarketSnapshot {
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    context: MarketContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Documents {
    users: HashMap<String, UserProfile>,
    assets: HashMap<String, AssetCandidate>,
    market: Vec<MarketSnapshot>,
}

/// Data source backed by a JSON file loaded at startup
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    documents: Documents,
}

impl JsonDocumentStore {
    /// Read and parse the document file
    pub async fn open(path: &Path) -> Result<Self, DataSourceError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DataSourceError::Backend(format!("reading {}: {}", path.display(), e))
        })?;
        let store = Self::from_json(&raw)
            .map_err(|e| DataSourceError::Backend(format!("{}: {}", path.display(), e)))?;
        info!(
            "Loaded {} users, {} assets, {} market snapshots from {}",
            store.documents.users.len(),
            store.documents.assets.len(),
            store.documents.market.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let documents = serde_json::from_str(raw)?;
        Ok(Self { documents })
    }
}

#[async_trait]
impl CouncilDataSource for JsonDocumentStore {
    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, DataSourceError> {
        self.documents
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| DataSourceError::UserNotFound(user_id.to_string()))
    }

    async fn asset_candidate(&self, asset_id: &str) -> Result<AssetCandidate, DataSourceError> {
        let mut asset = self
            .documents
            .assets
            .get(asset_id)
            .cloned()
            .ok_or_else(|| DataSourceError::AssetNotFound(asset_id.to_string()))?;
        // The collection key is the identifier
        if asset.asset_id.is_empty() {
            asset.asset_id = asset_id.to_string();
        }
        Ok(asset)
    }

    async fn market_context(&self) -> Result<MarketContext, DataSourceError> {
        // Untimestamped snapshots sort before any dated one
        let latest = self
            .documents
            .market
            .iter()
            .enumerate()
            .max_by_key(|(index, snapshot)| (snapshot.timestamp, *index))
            .map(|(_, snapshot)| snapshot)
            .ok_or(DataSourceError::NoMarketSnapshot)?;
        debug!("Using market snapshot from {:?}", latest.timestamp);
        Ok(latest.context.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{AssetType, LiquidityClass, MarketTrend, RateRegime, RiskLevel};
    use std::io::Write;

    const DOCS: &str = r#"{
        "users": {
            "user_1": { "monthly_income": 8000, "total_savings": 250000 }
        },
        "assets": {
            "VTI": { "asset_name": "Vanguard Total Market", "asset_type": "ETF" }
        },
        "market": [
            { "timestamp": "2026-01-05T09:00:00Z", "market_trend": "BEAR" },
            { "timestamp": "2026-03-01T09:00:00Z", "market_trend": "BULL", "volatility_index": 14.0 },
            { "market_trend": "SIDEWAYS" }
        ]
    }"#;

    #[tokio::test]
    async fn test_defaults_fill_missing_fields() {
        let store = JsonDocumentStore::from_json(DOCS).unwrap();

        let user = store.user_profile("user_1").await.unwrap();
        assert_eq!(user.monthly_income, 8000.0);
        assert_eq!(user.risk_tolerance, RiskLevel::Medium);
        assert_eq!(user.investment_horizon_months, 60);

        let asset = store.asset_candidate("VTI").await.unwrap();
        assert_eq!(asset.asset_id, "VTI");
        assert_eq!(asset.asset_type, AssetType::Etf);
        assert_eq!(asset.liquidity_class, LiquidityClass::Medium);
    }

    #[tokio::test]
    async fn test_latest_market_snapshot() {
        let store = JsonDocumentStore::from_json(DOCS).unwrap();
        let market = store.market_context().await.unwrap();
        assert_eq!(market.market_trend, MarketTrend::Bull);
        assert_eq!(market.volatility_index, 14.0);
        assert_eq!(market.interest_rate_regime, RateRegime::Stable);
    }

    #[tokio::test]
    async fn test_not_found() {
        let store = JsonDocumentStore::from_json(DOCS).unwrap();
        assert!(matches!(
            store.user_profile("nobody").await,
            Err(DataSourceError::UserNotFound(id)) if id == "nobody"
        ));
        assert!(matches!(
            store.asset_candidate("TSLA").await,
            Err(DataSourceError::AssetNotFound(_))
        ));

        let empty = JsonDocumentStore::from_json("{}").unwrap();
        assert!(matches!(
            empty.market_context().await,
            Err(DataSourceError::NoMarketSnapshot)
        ));
    }

    #[tokio::test]
    async fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCS.as_bytes()).unwrap();

        let store = JsonDocumentStore::open(file.path()).await.unwrap();
        assert!(store.user_profile("user_1").await.is_ok());

        let missing = JsonDocumentStore::open(Path::new("/nonexistent/council.json")).await;
        assert!(matches!(missing, Err(DataSourceError::Backend(_))));
    }
}

//! Data source port
//!
//! Looks up the records a council run starts from. Implementations return
//! complete records with defaults filled in for missing optional fields.

use async_trait::async_trait;
use council_domain::{AssetCandidate, MarketContext, UserProfile};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DataSourceError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("No market snapshot available")]
    NoMarketSnapshot,

    #[error("Data source error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CouncilDataSource: Send + Sync {
    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, DataSourceError>;

    async fn asset_candidate(&self, asset_id: &str) -> Result<AssetCandidate, DataSourceError>;

    /// Most recent market snapshot
    async fn market_context(&self) -> Result<MarketContext, DataSourceError>;
}

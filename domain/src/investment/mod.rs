//! Immutable run inputs
//!
//! Records the council reads but never changes: who is investing, what they
//! want to buy, the market they are buying into, and how much of the
//! portfolio the position would take.

pub mod asset;
pub mod market;
pub mod profile;

pub use asset::{AssetCandidate, AssetType, LiquidityClass};
pub use market::{MarketContext, MarketTrend, Position, RateRegime};
pub use profile::{FinancialGoal, Holding, RiskLevel, UserProfile};

//! Asset under evaluation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    #[default]
    Stock,
    Etf,
    Bond,
    Crypto,
    Commodity,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Etf => "ETF",
            AssetType::Bond => "BOND",
            AssetType::Crypto => "CRYPTO",
            AssetType::Commodity => "COMMODITY",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidityClass {
    High,
    #[default]
    Medium,
    Low,
}

impl LiquidityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidityClass::High => "HIGH",
            LiquidityClass::Medium => "MEDIUM",
            LiquidityClass::Low => "LOW",
        }
    }
}

impl std::fmt::Display for LiquidityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset being evaluated by the council
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCandidate {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: AssetType,
    pub sector: String,
    pub region: String,
    pub liquidity_class: LiquidityClass,
    pub expected_return_pct: f64,
}

impl AssetCandidate {
    pub fn new(asset_id: impl Into<String>, asset_name: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            asset_name: asset_name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = asset_type;
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_liquidity(mut self, liquidity: LiquidityClass) -> Self {
        self.liquidity_class = liquidity;
        self
    }

    pub fn with_expected_return(mut self, pct: f64) -> Self {
        self.expected_return_pct = pct;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let asset: AssetCandidate =
            serde_json::from_str(r#"{"asset_id": "VTI", "asset_type": "ETF"}"#).unwrap();

        assert_eq!(asset.asset_id, "VTI");
        assert_eq!(asset.asset_type, AssetType::Etf);
        assert_eq!(asset.liquidity_class, LiquidityClass::Medium);
        assert_eq!(asset.expected_return_pct, 0.0);
    }

    #[test]
    fn test_unknown_asset_type_rejected() {
        let result = serde_json::from_str::<AssetCandidate>(r#"{"asset_type": "REIT"}"#);
        assert!(result.is_err());
    }
}

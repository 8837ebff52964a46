//! Birdeye Types
//!
//! Response shape for `/defi/token_overview`. Field names changed across API
//! revisions, so both spellings are accepted where they differ.

use serde::Deserialize;

use crate::adapters::lenient;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenOverviewResponse {
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub data: Option<TokenOverview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenOverview {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::u8_opt")]
    pub decimals: Option<u8>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub liquidity: Option<f64>,
    #[serde(rename = "v24hUSD", default, deserialize_with = "lenient::f64_opt")]
    pub volume_24h_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient::u64_opt")]
    pub holder: Option<u64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub mc: Option<f64>,
    #[serde(rename = "marketCap", default, deserialize_with = "lenient::f64_opt")]
    pub market_cap: Option<f64>,
    #[serde(rename = "numberMarkets", default, deserialize_with = "lenient::u64_opt")]
    pub number_markets: Option<u64>,
}

impl TokenOverview {
    pub fn market_cap_usd(&self) -> Option<f64> {
        self.market_cap.or(self.mc)
    }
}

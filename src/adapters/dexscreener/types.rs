//! DexScreener Types
//!
//! Response shapes for `/latest/dex/tokens/{address}`. Every field is lenient:
//! a malformed pair is skipped and a malformed field reads as absent.

use serde::Deserialize;

use crate::adapters::lenient;

/// Chain identifier DexScreener uses for Solana pairs
pub const SOLANA_CHAIN_ID: &str = "solana";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenPairsResponse {
    #[serde(default, deserialize_with = "lenient::vec")]
    pub pairs: Vec<DexPair>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexPair {
    #[serde(rename = "chainId", default, deserialize_with = "lenient::string_opt")]
    pub chain_id: Option<String>,
    #[serde(rename = "baseToken", default, deserialize_with = "lenient::object")]
    pub base_token: Option<PairToken>,
    #[serde(rename = "priceUsd", default, deserialize_with = "lenient::f64_opt")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub volume: Option<PairVolume>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub liquidity: Option<PairLiquidity>,
    #[serde(rename = "marketCap", default, deserialize_with = "lenient::f64_opt")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub fdv: Option<f64>,
}

impl DexPair {
    /// Pairs without a chain id are assumed to be on the requested chain
    pub fn is_solana(&self) -> bool {
        self.chain_id
            .as_deref()
            .map_or(true, |chain| chain.eq_ignore_ascii_case(SOLANA_CHAIN_ID))
    }

    pub fn liquidity_usd(&self) -> Option<f64> {
        self.liquidity.as_ref().and_then(|l| l.usd)
    }

    pub fn volume_24h(&self) -> Option<f64> {
        self.volume.as_ref().and_then(|v| v.h24)
    }

    /// Market cap, falling back to fully diluted valuation
    pub fn market_cap_usd(&self) -> Option<f64> {
        self.market_cap.or(self.fdv)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairToken {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairVolume {
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairLiquidity {
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub usd: Option<f64>,
}

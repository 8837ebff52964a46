//! DexScreener Client
//!
//! Fetches every pool listing a token and folds them into pool-level market
//! metrics: summed liquidity and volume, price and market cap from the most
//! liquid pool, and the pool count. No API key is required.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use solana_sdk::pubkey::Pubkey;

use super::types::{DexPair, TokenPairsResponse};
use crate::adapters::retry::{build_client, read_json, send_with_retry, RetryPolicy};
use crate::domain::RawProviderMetrics;
use crate::ports::{MarketDataProvider, ProviderError};

pub const DEFAULT_DEXSCREENER_URL: &str = "https://api.dexscreener.com";

const PROVIDER_NAME: &str = "dexscreener";

/// Configuration for the DexScreenerClient
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DEXSCREENER_URL.to_string(),
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for DexScreener token pair listings
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    /// Create a new DexScreenerClient with default configuration
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(DexScreenerConfig::default())
    }

    pub fn with_config(config: DexScreenerConfig) -> Result<Self, ProviderError> {
        let http = build_client(config.timeout)?;
        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn pairs_url(&self, mint: &Pubkey) -> String {
        format!(
            "{}/latest/dex/tokens/{}",
            self.config.base_url.trim_end_matches('/'),
            mint
        )
    }

    /// Fetch raw pair listings for a token
    pub async fn get_token_pairs(&self, mint: &Pubkey) -> Result<TokenPairsResponse, ProviderError> {
        let url = self.pairs_url(mint);
        let response = send_with_retry(&self.config.retry, PROVIDER_NAME, || {
            self.http.get(&url).send()
        })
        .await?;
        read_json(response).await
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch(&self, mint: &Pubkey) -> Result<RawProviderMetrics, ProviderError> {
        let response = self.get_token_pairs(mint).await?;
        Ok(summarize_pairs(&mint.to_string(), response))
    }
}

/// Fold pair listings into token-level metrics
///
/// A token with no Solana pairs yields `pool_count = 0` and no market fields.
pub fn summarize_pairs(mint: &str, response: TokenPairsResponse) -> RawProviderMetrics {
    let pairs: Vec<DexPair> = response.pairs.into_iter().filter(DexPair::is_solana).collect();

    let liquidity_usd = sum_present(pairs.iter().map(DexPair::liquidity_usd));
    let volume_24h_usd = sum_present(pairs.iter().map(DexPair::volume_24h));

    let deepest = pairs.iter().max_by(|a, b| {
        let a = a.liquidity_usd().unwrap_or(0.0);
        let b = b.liquidity_usd().unwrap_or(0.0);
        a.total_cmp(&b)
    });

    let price_usd = deepest
        .and_then(|p| p.price_usd)
        .or_else(|| pairs.iter().find_map(|p| p.price_usd));
    let market_cap_usd = deepest
        .and_then(DexPair::market_cap_usd)
        .or_else(|| pairs.iter().find_map(DexPair::market_cap_usd));

    let token = pairs
        .iter()
        .filter_map(|p| p.base_token.as_ref())
        .find(|t| t.address.as_deref() == Some(mint));

    RawProviderMetrics {
        name: token.and_then(|t| t.name.clone()),
        symbol: token.and_then(|t| t.symbol.clone()),
        price_usd,
        liquidity_usd,
        volume_24h_usd,
        market_cap_usd,
        pool_count: Some(pairs.len() as u64),
        sources: vec![PROVIDER_NAME.to_string()],
        ..Default::default()
    }
}

/// Sum of the present values, or `None` when all are absent
fn sum_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

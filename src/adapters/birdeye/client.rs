//! Birdeye Client
//!
//! Token overview from Birdeye: holder count plus price, liquidity, volume and
//! market cap. Requires an API key; without one every fetch fails immediately
//! with `MissingCredential` and no request is sent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use solana_sdk::pubkey::Pubkey;

use super::types::{TokenOverview, TokenOverviewResponse};
use crate::adapters::retry::{build_client, read_json, send_with_retry, RetryPolicy};
use crate::domain::RawProviderMetrics;
use crate::ports::{MarketDataProvider, ProviderError};

pub const DEFAULT_BIRDEYE_URL: &str = "https://public-api.birdeye.so";

/// Environment variable holding the API key
pub const BIRDEYE_API_KEY_ENV: &str = "BIRDEYE_API_KEY";

const PROVIDER_NAME: &str = "birdeye";

#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BIRDEYE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    config: BirdeyeConfig,
    http: Client,
}

impl BirdeyeClient {
    pub fn with_config(config: BirdeyeConfig) -> Result<Self, ProviderError> {
        let http = build_client(config.timeout)?;
        Ok(Self { config, http })
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn overview_url(&self) -> String {
        format!("{}/defi/token_overview", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch the raw token overview
    pub async fn get_token_overview(&self, mint: &Pubkey) -> Result<TokenOverviewResponse, ProviderError> {
        let api_key = self
            .api_key()
            .ok_or(ProviderError::MissingCredential(BIRDEYE_API_KEY_ENV))?;
        let url = self.overview_url();
        let address = mint.to_string();

        let response = send_with_retry(&self.config.retry, PROVIDER_NAME, || {
            self.http
                .get(&url)
                .query(&[("address", address.as_str())])
                .header("X-API-KEY", api_key)
                .header("x-chain", "solana")
                .header("accept", "application/json")
                .send()
        })
        .await?;

        read_json(response).await
    }
}

#[async_trait]
impl MarketDataProvider for BirdeyeClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch(&self, mint: &Pubkey) -> Result<RawProviderMetrics, ProviderError> {
        let response = self.get_token_overview(mint).await?;
        overview_to_metrics(&mint.to_string(), response)
    }
}

/// Convert an overview payload into raw metrics
pub fn overview_to_metrics(
    mint: &str,
    response: TokenOverviewResponse,
) -> Result<RawProviderMetrics, ProviderError> {
    if response.success == Some(false) {
        return Err(ProviderError::NoData(mint.to_string()));
    }

    let overview: TokenOverview = response
        .data
        .ok_or_else(|| ProviderError::NoData(mint.to_string()))?;

    Ok(RawProviderMetrics {
        name: overview.name.clone(),
        symbol: overview.symbol.clone(),
        price_usd: overview.price,
        liquidity_usd: overview.liquidity,
        volume_24h_usd: overview.volume_24h_usd,
        holders: overview.holder,
        market_cap_usd: overview.market_cap_usd(),
        pool_count: overview.number_markets,
        decimals: overview.decimals,
        sources: vec![PROVIDER_NAME.to_string()],
        ..Default::default()
    })
}

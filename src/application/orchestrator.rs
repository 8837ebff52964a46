//! Analysis Orchestrator
//!
//! Drives one token analysis: validate the address, fan out to every market
//! data provider concurrently, merge what came back in provider order, then
//! score. A provider that errors or exceeds the fetch timeout is replaced by
//! an empty result and recorded in `tokenData.degraded`; it never fails the
//! request.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::adapters::birdeye::{BirdeyeClient, BirdeyeConfig};
use crate::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use crate::adapters::solana::{validate_address, AddressError};
use crate::adapters::token_metadata::{TokenMetadataClient, TokenMetadataConfig};
use crate::config::Config;
use crate::domain::{
    CompositeAnalysis, CompositeScorer, NormalizerSet, RawProviderMetrics, ScoringError,
    ScoringWeights, WeightError,
};
use crate::ports::{MarketDataProvider, ProviderError};

/// Default upper bound on a single provider fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Invalid Solana address")]
    InvalidAddress(#[from] AddressError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ScoringError> for AnalyzeError {
    fn from(e: ScoringError) -> Self {
        AnalyzeError::Internal(e.to_string())
    }
}

/// Errors building an orchestrator from configuration
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Invalid scoring weights: {0}")]
    Weights(#[from] WeightError),

    #[error("Failed to build provider client: {0}")]
    Provider(#[from] ProviderError),
}

/// Progress of a single analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Idle,
    ValidatingInput,
    Fetching,
    Normalizing,
    Responding,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisStage::Idle => "idle",
            AnalysisStage::ValidatingInput => "validating_input",
            AnalysisStage::Fetching => "fetching",
            AnalysisStage::Normalizing => "normalizing",
            AnalysisStage::Responding => "responding",
        };
        f.write_str(s)
    }
}

/// Immutable after construction; share through `Arc` across requests
pub struct AnalysisOrchestrator {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    scorer: CompositeScorer,
    fetch_timeout: Duration,
}

impl AnalysisOrchestrator {
    /// Providers are merged in the order given here
    pub fn new(
        providers: Vec<Arc<dyn MarketDataProvider>>,
        scorer: CompositeScorer,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            scorer,
            fetch_timeout,
        }
    }

    /// Build the provider chain (DexScreener, Birdeye, Solana RPC) from config
    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        let weights = ScoringWeights::new(config.scoring.weights.clone())?;
        let retry = config.providers.retry_policy();
        let fetch_timeout = config.providers.fetch_timeout();
        let client_timeout = retry.attempt_timeout(fetch_timeout);

        let mut providers: Vec<Arc<dyn MarketDataProvider>> = Vec::new();

        if config.providers.dexscreener.enabled {
            providers.push(Arc::new(DexScreenerClient::with_config(DexScreenerConfig {
                base_url: config.providers.dexscreener.base_url.clone(),
                timeout: client_timeout,
                retry: retry.clone(),
            })?));
        }

        if config.providers.birdeye.enabled {
            providers.push(Arc::new(BirdeyeClient::with_config(BirdeyeConfig {
                base_url: config.providers.birdeye.base_url.clone(),
                api_key: config.providers.birdeye.api_key.clone(),
                timeout: client_timeout,
                retry: retry.clone(),
            })?));
        }

        providers.push(Arc::new(TokenMetadataClient::with_config(TokenMetadataConfig {
            rpc_url: config.providers.solana.rpc_url.clone(),
            timeout: client_timeout,
            retry,
        })?));

        tracing::info!(
            "Analyzer ready with providers [{}], fetch timeout {:?}, attempt timeout {:?}",
            providers.iter().map(|p| p.name()).collect::<Vec<_>>().join(", "),
            fetch_timeout,
            client_timeout
        );

        Ok(Self::new(
            providers,
            CompositeScorer::new(NormalizerSet::standard(), weights),
            fetch_timeout,
        ))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.scorer.weights()
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Score one token address
    pub async fn analyze(&self, address: &str) -> Result<CompositeAnalysis, AnalyzeError> {
        trace_stage(AnalysisStage::Idle, address);

        trace_stage(AnalysisStage::ValidatingInput, address);
        let mint = validate_address(address).map_err(|e| {
            tracing::info!("Rejected address '{}': {}", address.trim(), e);
            AnalyzeError::from(e)
        })?;

        trace_stage(AnalysisStage::Fetching, address);
        let raw = self.fetch_all(&mint).await;

        trace_stage(AnalysisStage::Normalizing, address);
        let analysis = self.scorer.score(raw).map_err(|e| {
            tracing::error!("Scoring failed for {}: {}", mint, e);
            AnalyzeError::from(e)
        })?;

        trace_stage(AnalysisStage::Responding, address);
        tracing::info!(
            "Analyzed {}: score {} ({:?}), sources {:?}, degraded {:?}",
            mint,
            analysis.overall_score,
            analysis.rating,
            analysis.token_data.sources,
            analysis.token_data.degraded
        );
        Ok(analysis)
    }

    /// Query every provider concurrently and merge in provider order
    ///
    /// Market cap falls back to price times on-chain supply.
    pub async fn fetch_all(&self, mint: &Pubkey) -> RawProviderMetrics {
        let fetches = self
            .providers
            .iter()
            .map(|provider| self.fetch_one(provider.as_ref(), mint));

        let merged = join_all(fetches)
            .await
            .into_iter()
            .fold(RawProviderMetrics::default(), RawProviderMetrics::merge)
            .with_derived_market_cap();

        if merged.is_empty() {
            tracing::warn!("No provider returned data for {}", mint);
        }
        merged
    }

    async fn fetch_one(&self, provider: &dyn MarketDataProvider, mint: &Pubkey) -> RawProviderMetrics {
        let name = provider.name();

        let result = match tokio::time::timeout(self.fetch_timeout, provider.fetch(mint)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.fetch_timeout.as_millis() as u64)),
        };

        match result {
            Ok(mut metrics) => {
                if !metrics.sources.iter().any(|s| s == name) {
                    metrics.sources.push(name.to_string());
                }
                metrics
            }
            Err(e) => {
                tracing::warn!("{} fetch failed for {}, using empty result: {}", name, mint, e);
                RawProviderMetrics {
                    degraded: vec![name.to_string()],
                    ..Default::default()
                }
            }
        }
    }
}

fn trace_stage(stage: AnalysisStage, address: &str) {
    tracing::debug!(stage = %stage, address = address.trim(), "analysis stage");
}

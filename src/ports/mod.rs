//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, the market data providers the analyzer
//! fans out to are abstracted behind `MarketDataProvider`.

pub mod mocks;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::domain::RawProviderMetrics;

/// Market data provider error type
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Rate limited, try again later")]
    RateLimited,

    #[error("Provider returned no data for {0}")]
    NoData(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

/// A third-party source of token market data
///
/// Implementations normalize the provider's response into `RawProviderMetrics`
/// and report any failure as `ProviderError`. Callers decide how to degrade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name used in logs and `tokenData.sources`
    fn name(&self) -> &'static str;

    /// Fetch whatever the provider knows about a token mint
    async fn fetch(&self, mint: &Pubkey) -> Result<RawProviderMetrics, ProviderError>;
}

pub use mocks::MockProvider;

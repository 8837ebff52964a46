//! Raw Provider Metrics
//!
//! The loosely-typed bag of signals returned by market data providers, and the
//! closed set of metric names the scorer understands.
//!
//! Every field is optional: providers disagree on shape and routinely omit data.
//! Absence is a normal state here, never an error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Names of the sub-scores that can take part in a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Liquidity,
    Volume,
    Holders,
    #[serde(alias = "market_cap")]
    MarketCap,
    #[serde(alias = "pool_count")]
    PoolCount,
    Security,
    Social,
}

impl MetricKind {
    /// All metric kinds, in display order
    pub const ALL: [MetricKind; 7] = [
        MetricKind::Liquidity,
        MetricKind::Volume,
        MetricKind::Holders,
        MetricKind::MarketCap,
        MetricKind::PoolCount,
        MetricKind::Security,
        MetricKind::Social,
    ];

    /// Wire name used in JSON payloads and config keys
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Liquidity => "liquidity",
            MetricKind::Volume => "volume",
            MetricKind::Holders => "holders",
            MetricKind::MarketCap => "marketCap",
            MetricKind::PoolCount => "poolCount",
            MetricKind::Security => "security",
            MetricKind::Social => "social",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw signals gathered for one token from one or more providers
///
/// `RawProviderMetrics::default()` is the degraded-empty result substituted
/// when a provider fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProviderMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Price in USD
    #[serde(rename = "price", skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    /// Total liquidity across pools in USD
    #[serde(rename = "liquidity", skip_serializing_if = "Option::is_none")]
    pub liquidity_usd: Option<f64>,
    /// 24-hour trading volume in USD
    #[serde(rename = "volume24h", skip_serializing_if = "Option::is_none")]
    pub volume_24h_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holders: Option<u64>,
    #[serde(rename = "marketCap", skip_serializing_if = "Option::is_none")]
    pub market_cap_usd: Option<f64>,
    /// Number of DEX pools listing the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    /// Supply in base units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_authority_revoked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze_authority_revoked: Option<bool>,
    /// Providers that answered
    #[serde(default)]
    pub sources: Vec<String>,
    /// Providers that failed and were replaced by the empty result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

impl RawProviderMetrics {
    /// Whether no market field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.symbol.is_none()
            && self.price_usd.is_none()
            && self.liquidity_usd.is_none()
            && self.volume_24h_usd.is_none()
            && self.holders.is_none()
            && self.market_cap_usd.is_none()
            && self.pool_count.is_none()
            && self.decimals.is_none()
            && self.supply.is_none()
            && self.mint_authority_revoked.is_none()
            && self.freeze_authority_revoked.is_none()
    }

    /// Combine two bags field by field; values already present in `self` win.
    pub fn merge(mut self, other: RawProviderMetrics) -> Self {
        self.name = self.name.or(other.name);
        self.symbol = self.symbol.or(other.symbol);
        self.price_usd = self.price_usd.or(other.price_usd);
        self.liquidity_usd = self.liquidity_usd.or(other.liquidity_usd);
        self.volume_24h_usd = self.volume_24h_usd.or(other.volume_24h_usd);
        self.holders = self.holders.or(other.holders);
        self.market_cap_usd = self.market_cap_usd.or(other.market_cap_usd);
        self.pool_count = self.pool_count.or(other.pool_count);
        self.decimals = self.decimals.or(other.decimals);
        self.supply = self.supply.or(other.supply);
        self.mint_authority_revoked = self.mint_authority_revoked.or(other.mint_authority_revoked);
        self.freeze_authority_revoked =
            self.freeze_authority_revoked.or(other.freeze_authority_revoked);
        for source in other.sources {
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
        }
        for source in other.degraded {
            if !self.degraded.contains(&source) {
                self.degraded.push(source);
            }
        }
        self
    }

    /// Numeric signal feeding a threshold-ladder metric
    pub fn numeric(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Liquidity => self.liquidity_usd,
            MetricKind::Volume => self.volume_24h_usd,
            MetricKind::Holders => self.holders.map(|h| h as f64),
            MetricKind::MarketCap => self.market_cap_usd,
            MetricKind::PoolCount => self.pool_count.map(|p| p as f64),
            MetricKind::Security | MetricKind::Social => None,
        }
    }

    /// Supply adjusted for decimals
    pub fn supply_adjusted(&self) -> Option<f64> {
        match (self.supply, self.decimals) {
            (Some(supply), Some(decimals)) => Some(supply as f64 / 10f64.powi(decimals as i32)),
            _ => None,
        }
    }

    /// Fill market cap from price and on-chain supply when no provider reported it
    pub fn with_derived_market_cap(mut self) -> Self {
        if self.market_cap_usd.is_none() {
            if let (Some(price), Some(supply)) = (self.price_usd, self.supply_adjusted()) {
                let market_cap = price * supply;
                if market_cap.is_finite() && market_cap >= 0.0 {
                    self.market_cap_usd = Some(market_cap);
                }
            }
        }
        self
    }
}

//! DexScreener Adapter
//!
//! Pool-level market data (liquidity, 24h volume, price, market cap, pool
//! count) from DexScreener's public token endpoint.

mod client;
mod types;

pub use client::{summarize_pairs, DexScreenerClient, DexScreenerConfig, DEFAULT_DEXSCREENER_URL};
pub use types::{DexPair, TokenPairsResponse};

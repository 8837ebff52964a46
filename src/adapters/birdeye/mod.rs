//! Birdeye Adapter
//!
//! Holder count and token overview from Birdeye's public API
//! (`X-API-KEY` header, `BIRDEYE_API_KEY`).

mod client;
mod types;

pub use client::{overview_to_metrics, BirdeyeClient, BirdeyeConfig, BIRDEYE_API_KEY_ENV, DEFAULT_BIRDEYE_URL};
pub use types::{TokenOverview, TokenOverviewResponse};

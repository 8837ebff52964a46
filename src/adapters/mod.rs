//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and inbound surfaces:
//! - DexScreener: pool listings (liquidity, volume, pool count)
//! - Birdeye: token overview (holders, market data)
//! - Token metadata: mint account over Solana RPC (authorities, supply)
//! - Solana: address validation
//! - API: axum HTTP server
//! - CLI: Command-line interface handlers

pub mod lenient;
pub mod retry;
pub mod dexscreener;
pub mod birdeye;
pub mod token_metadata;
pub mod solana;
pub mod api;
pub mod cli;

pub use dexscreener::DexScreenerClient;
pub use birdeye::BirdeyeClient;
pub use token_metadata::TokenMetadataClient;
pub use cli::CliApp;

//! SniffTools - Solana token scoring library
//!
//! Queries market data providers for a token mint and combines liquidity,
//! volume, holders, market cap, pool count and mint authority status into one
//! weighted 0-100 score.
//!
//! # Modules
//!
//! - `domain`: Scoring core (metrics, normalizers, weights, composite scorer)
//! - `ports`: Provider trait abstraction (`MarketDataProvider`)
//! - `adapters`: External implementations (DexScreener, Birdeye, Solana RPC, HTTP API, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Analysis orchestrator

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;

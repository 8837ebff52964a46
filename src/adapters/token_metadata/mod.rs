//! Token Metadata Adapter
//!
//! Mint account data from Solana RPC:
//! - Mint authority status (revoked = no further issuance)
//! - Freeze authority status (revoked = holder accounts cannot be frozen)
//! - Token supply and decimals
//!
//! Uses Solana's `getAccountInfo` RPC method with `jsonParsed` encoding.

mod client;
mod types;

pub use client::{
    mint_account_to_metrics, parse_mint_account, TokenMetadataClient, TokenMetadataConfig,
    SOLANA_RPC_URL_ENV,
};
pub use types::{AccountInfoResponse, AuthorityInfo, MintAccount};

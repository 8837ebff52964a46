//! Token Metadata Client
//!
//! Reads the SPL mint account over JSON-RPC (`getAccountInfo`, jsonParsed) to
//! report supply, decimals and whether mint and freeze authorities are revoked.
//! Requires `SOLANA_RPC_URL`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;

use super::types::{AccountData, AccountInfoResponse, AuthorityInfo, MintAccount};
use crate::adapters::retry::{build_client, read_json, send_with_retry, RetryPolicy};
use crate::domain::RawProviderMetrics;
use crate::ports::{MarketDataProvider, ProviderError};

/// Environment variable holding the RPC endpoint
pub const SOLANA_RPC_URL_ENV: &str = "SOLANA_RPC_URL";

const PROVIDER_NAME: &str = "solana-rpc";

/// Configuration for the TokenMetadataClient
#[derive(Debug, Clone)]
pub struct TokenMetadataConfig {
    /// Solana RPC endpoint URL
    pub rpc_url: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TokenMetadataConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

impl TokenMetadataConfig {
    pub fn with_rpc_url(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: Some(rpc_url.into()),
            ..Default::default()
        }
    }
}

/// Client for mint account data from Solana RPC
#[derive(Debug, Clone)]
pub struct TokenMetadataClient {
    config: TokenMetadataConfig,
    http: Client,
}

impl TokenMetadataClient {
    pub fn with_config(config: TokenMetadataConfig) -> Result<Self, ProviderError> {
        let http = build_client(config.timeout)?;
        Ok(Self { config, http })
    }

    pub fn with_rpc_url(rpc_url: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_config(TokenMetadataConfig::with_rpc_url(rpc_url))
    }

    /// Configured RPC endpoint, if any
    pub fn rpc_url(&self) -> Option<&str> {
        self.config.rpc_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Fetch and decode the mint account
    pub async fn get_mint_account(&self, mint: &Pubkey) -> Result<MintAccount, ProviderError> {
        let rpc_url = self
            .rpc_url()
            .ok_or(ProviderError::MissingCredential(SOLANA_RPC_URL_ENV))?;

        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAccountInfo",
            "params": [
                mint.to_string(),
                { "encoding": "jsonParsed" }
            ]
        });

        let response = send_with_retry(&self.config.retry, PROVIDER_NAME, || {
            self.http.post(rpc_url).json(&request_body).send()
        })
        .await?;

        let body: AccountInfoResponse = read_json(response).await?;
        parse_mint_account(&mint.to_string(), body)
    }
}

#[async_trait]
impl MarketDataProvider for TokenMetadataClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch(&self, mint: &Pubkey) -> Result<RawProviderMetrics, ProviderError> {
        let account = self.get_mint_account(mint).await?;
        Ok(mint_account_to_metrics(&account))
    }
}

/// Decode a getAccountInfo response into a mint account
pub fn parse_mint_account(mint: &str, response: AccountInfoResponse) -> Result<MintAccount, ProviderError> {
    if let Some(error) = response.error {
        return Err(ProviderError::Parse(format!(
            "RPC error {}: {}",
            error.code, error.message
        )));
    }

    let value = response
        .result
        .and_then(|r| r.value)
        .ok_or_else(|| ProviderError::NoData(mint.to_string()))?;

    let parsed = match value.data {
        AccountData::Parsed(parsed) => parsed,
        AccountData::Raw(_) => {
            return Err(ProviderError::Parse(format!(
                "account {} is not a parsable token account",
                mint
            )))
        }
    };

    if parsed.parsed.account_type != "mint" {
        return Err(ProviderError::Parse(format!(
            "account type is '{}', expected 'mint'",
            parsed.parsed.account_type
        )));
    }

    let info = parsed.parsed.info;
    Ok(MintAccount {
        supply: info.supply,
        decimals: info.decimals,
        authority: AuthorityInfo::new(info.mint_authority, info.freeze_authority),
    })
}

pub fn mint_account_to_metrics(account: &MintAccount) -> RawProviderMetrics {
    RawProviderMetrics {
        decimals: account.decimals,
        supply: account.supply,
        mint_authority_revoked: Some(account.authority.mint_authority_revoked()),
        freeze_authority_revoked: Some(account.authority.freeze_authority_revoked()),
        sources: vec![PROVIDER_NAME.to_string()],
        ..Default::default()
    }
}

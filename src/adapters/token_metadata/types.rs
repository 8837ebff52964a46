//! Token Metadata Types
//!
//! `getAccountInfo` response shapes (jsonParsed encoding) and the mint
//! authority view derived from them.

use serde::{Deserialize, Serialize};

use crate::adapters::lenient;

/// Mint and freeze authority state of a token mint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthorityInfo {
    /// Current mint authority (None = revoked)
    pub mint_authority: Option<String>,
    /// Current freeze authority (None = revoked)
    pub freeze_authority: Option<String>,
}

impl AuthorityInfo {
    pub fn new(mint_authority: Option<String>, freeze_authority: Option<String>) -> Self {
        Self {
            mint_authority,
            freeze_authority,
        }
    }

    pub fn mint_authority_revoked(&self) -> bool {
        self.mint_authority.is_none()
    }

    pub fn freeze_authority_revoked(&self) -> bool {
        self.freeze_authority.is_none()
    }
}

/// Decoded SPL mint account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAccount {
    /// Supply in base units
    pub supply: Option<u64>,
    pub decimals: Option<u8>,
    pub authority: AuthorityInfo,
}

/// JSON-RPC envelope for getAccountInfo
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfoResponse {
    #[serde(default, deserialize_with = "lenient::object")]
    pub result: Option<AccountInfoResult>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfoResult {
    #[serde(default, deserialize_with = "lenient::object")]
    pub value: Option<AccountInfoValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfoValue {
    pub data: AccountData,
}

/// Parsed data, or the `[base64, encoding]` pair when the RPC could not parse it
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccountData {
    Parsed(ParsedAccountData),
    Raw(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccountData {
    pub parsed: ParsedInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedInfo {
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub info: MintInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintInfo {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub mint_authority: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub freeze_authority: Option<String>,
    /// Encoded as a decimal string by the RPC
    #[serde(default, deserialize_with = "lenient::u64_opt")]
    pub supply: Option<u64>,
    #[serde(default, deserialize_with = "lenient::u8_opt")]
    pub decimals: Option<u8>,
}

//! Configuration Loader
//!
//! Loads and validates configuration from an optional TOML file, then applies
//! environment overrides. Every section has defaults, so an empty file (or no
//! file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::retry::RetryPolicy;
use crate::domain::weights::default_weight_table;
use crate::domain::{MetricKind, ScoringWeights, WeightError};

/// Upper bound on `providers.max_retries`
pub const MAX_RETRIES: u32 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub providers: ProvidersSection,
    pub scoring: ScoringSection,
    pub logging: LoggingSection,
}

/// HTTP server section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Market data provider section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvidersSection {
    /// Upper bound on each provider fetch, in milliseconds
    pub fetch_timeout_ms: u64,
    /// Extra attempts after a 429, 5xx or transport error
    pub max_retries: u32,
    /// Base delay for retry backoff (milliseconds)
    pub retry_base_delay_ms: u64,
    pub dexscreener: DexScreenerSection,
    pub birdeye: BirdeyeSection,
    pub solana: SolanaSection,
}

impl Default for ProvidersSection {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 5_000,
            max_retries: 1,
            retry_base_delay_ms: 200,
            dexscreener: DexScreenerSection::default(),
            birdeye: BirdeyeSection::default(),
            solana: SolanaSection::default(),
        }
    }
}

impl ProvidersSection {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DexScreenerSection {
    pub enabled: bool,
    pub base_url: String,
}

impl Default for DexScreenerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: crate::adapters::dexscreener::DEFAULT_DEXSCREENER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BirdeyeSection {
    pub enabled: bool,
    pub base_url: String,
    /// API key; `BIRDEYE_API_KEY` overrides it
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for BirdeyeSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: crate::adapters::birdeye::DEFAULT_BIRDEYE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Solana RPC section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SolanaSection {
    /// RPC endpoint; `SOLANA_RPC_URL` overrides it
    #[serde(skip_serializing)]
    pub rpc_url: Option<String>,
}

/// Scoring section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Metric weights, must sum to 1.0
    pub weights: BTreeMap<MetricKind, f64>,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            weights: default_weight_table(),
        }
    }
}

/// Logging section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid scoring weights: {0}")]
    Weights(#[from] WeightError),
}

/// Whether a credential is configured, without revealing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    Present,
    Missing,
}

impl CredentialStatus {
    fn of(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => CredentialStatus::Present,
            _ => CredentialStatus::Missing,
        }
    }
}

/// Credential report served by `/test-config`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStatus {
    #[serde(rename = "BIRDEYE_API_KEY")]
    pub birdeye_api_key: CredentialStatus,
    #[serde(rename = "SOLANA_RPC_URL")]
    pub solana_rpc_url: CredentialStatus,
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load from an optional file, apply process environment, validate
pub fn load_with_env(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Apply environment overrides through an injectable lookup
    ///
    /// Unparsable `PORT` values are ignored with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(host) = non_empty("HOST") {
            self.server.host = host.trim().to_string();
        }
        if let Some(key) = non_empty("BIRDEYE_API_KEY") {
            self.providers.birdeye.api_key = Some(key);
        }
        if let Some(url) = non_empty("SOLANA_RPC_URL") {
            self.providers.solana.rpc_url = Some(url.trim().to_string());
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.fetch_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "fetch_timeout_ms must be > 0".to_string(),
            ));
        }

        if self.providers.max_retries > MAX_RETRIES {
            return Err(ConfigError::ValidationError(format!(
                "max_retries must be <= {}, got {}",
                MAX_RETRIES, self.providers.max_retries
            )));
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("host must not be empty".to_string()));
        }

        if self.providers.dexscreener.enabled && self.providers.dexscreener.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dexscreener.base_url must not be empty".to_string(),
            ));
        }

        if self.providers.birdeye.enabled && self.providers.birdeye.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "birdeye.base_url must not be empty".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                valid_levels, self.logging.level
            )));
        }

        self.scoring_weights()?;
        Ok(())
    }

    /// Validated weight table
    pub fn scoring_weights(&self) -> Result<ScoringWeights, WeightError> {
        ScoringWeights::new(self.scoring.weights.clone())
    }

    pub fn status(&self) -> ConfigStatus {
        ConfigStatus {
            birdeye_api_key: CredentialStatus::of(self.providers.birdeye.api_key.as_deref()),
            solana_rpc_url: CredentialStatus::of(self.providers.solana.rpc_url.as_deref()),
        }
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the SniffTools scoring service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::api::{self, AnalyzeResponse, AppState};
use crate::application::AnalysisOrchestrator;
use crate::config::{load_with_env, Config};

/// SniffTools - Solana token scoring API
#[derive(Parser, Debug)]
#[command(
    name = "sniff-score",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Composite trust score for Solana tokens",
    long_about = "sniff-score queries DexScreener, Birdeye and Solana RPC for a token mint, \
                  normalizes liquidity, volume, holders, market cap, pool count and mint \
                  authority status onto 0-100, and combines them into one weighted score."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve(ServeCmd),

    /// Score a single token and print the JSON analysis
    Analyze(AnalyzeCmd),

    /// Report which credentials are configured and the active weights
    CheckConfig(CheckConfigCmd),
}

/// Start the HTTP API
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override listen port (also PORT)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// Score one token
#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Token mint address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Configuration report
#[derive(Parser, Debug)]
pub struct CheckConfigCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Command {
    fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Serve(cmd) => cmd.config.as_ref(),
            Command::Analyze(cmd) => cmd.config.as_ref(),
            Command::CheckConfig(cmd) => cmd.config.as_ref(),
        }
    }
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    let config = load_with_env(app.command.config_path().map(PathBuf::as_path))
        .context("Failed to load configuration")?;

    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Serve(cmd) => serve_command(cmd, config).await,
        Command::Analyze(cmd) => analyze_command(cmd, config).await,
        Command::CheckConfig(_) => check_config_command(config),
    }
}

/// RUST_LOG wins, then --debug / --verbose, then `[logging].level`
fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = if debug {
        "debug,tower_http=debug"
    } else if verbose {
        "info,tower_http=info"
    } else {
        configured
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .context("Invalid log filter")?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn build_analyzer(config: &Config) -> Result<Arc<AnalysisOrchestrator>> {
    let analyzer = AnalysisOrchestrator::from_config(config).context("Failed to build analyzer")?;
    Ok(Arc::new(analyzer))
}

/// Handle serve command
async fn serve_command(cmd: ServeCmd, mut config: Config) -> Result<()> {
    if let Some(port) = cmd.port {
        config.server.port = port;
    }

    let status = config.status();
    tracing::info!(
        "Credentials: BIRDEYE_API_KEY {:?}, SOLANA_RPC_URL {:?}",
        status.birdeye_api_key,
        status.solana_rpc_url
    );

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;

    let state = Arc::new(AppState {
        analyzer: build_analyzer(&config)?,
        config_status: status,
    });

    api::serve(state, addr).await.context("HTTP server failed")
}

/// Handle analyze command
async fn analyze_command(cmd: AnalyzeCmd, config: Config) -> Result<()> {
    let analyzer = build_analyzer(&config)?;
    let analysis = analyzer.analyze(&cmd.address).await?;
    let response = AnalyzeResponse::from(analysis);

    let output = if cmd.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{}", output);
    Ok(())
}

/// Handle check-config command
fn check_config_command(config: Config) -> Result<()> {
    let weights = config.scoring_weights().context("Invalid scoring weights")?;

    let report = serde_json::json!({
        "credentials": config.status(),
        "listen": config.bind_address(),
        "fetchTimeoutMs": config.providers.fetch_timeout_ms,
        "weights": weights,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let app = CliApp::try_parse_from(["sniff-score", "serve", "--port", "8081", "-v"]).unwrap();
        assert!(app.verbose);
        match app.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.port, Some(8081));
                assert!(cmd.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze() {
        let app = CliApp::try_parse_from([
            "sniff-score",
            "--debug",
            "analyze",
            "So11111111111111111111111111111111111111112",
            "--config",
            "sniff.toml",
        ])
        .unwrap();
        assert!(app.debug);
        assert_eq!(app.command.config_path(), Some(&PathBuf::from("sniff.toml")));
        match app.command {
            Command::Analyze(cmd) => {
                assert_eq!(cmd.address, "So11111111111111111111111111111111111111112");
                assert!(!cmd.compact);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_config() {
        let app = CliApp::try_parse_from(["sniff-score", "check-config"]).unwrap();
        assert!(matches!(app.command, Command::CheckConfig(_)));
    }

    #[test]
    fn test_analyze_requires_address() {
        assert!(CliApp::try_parse_from(["sniff-score", "analyze"]).is_err());
    }
}

//! SniffTools - Solana token scoring API
//!
//! Aggregates market data for a token mint into a composite trust score.

use anyhow::Result;
use clap::Parser;

use sniff_score::adapters::cli::{self, CliApp};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API keys go here, not in the config file)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    cli::execute(app).await
}

//! One-shot price query
//!
//! Reads the configured pool once, prints the intermediate values and the
//! price, then exits. Exits non-zero if any read fails.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use eth_price_api::{Config, PriceOracle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    let oracle = PriceOracle::new(config.oracle_config(), config.rpc_timeout)?;

    let quote = oracle
        .quote()
        .await
        .context("failed to fetch ETH price")?;

    println!("{}", quote.report());

    Ok(())
}

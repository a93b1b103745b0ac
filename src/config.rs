//! Configuration Module
//!
//! Settings come from environment variables (optionally via `.env`).
//! Every value has a development default; anything present but malformed
//! fails at startup instead of at the first request.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use ethers::types::Address;

use crate::services::OracleConfig;

/// WETH/USDT 0.3% pool on Ethereum mainnet.
pub const DEFAULT_POOL_ADDRESS: &str = "0xc7bBeC68d12a0d1830360F8Ec58fA599bA1b0e9b";
pub const DEFAULT_RPC_URL: &str = "https://ethereum-rpc.publicnode.com";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// 10^77 is the largest power of ten that fits in a uint256
pub const MAX_PRICE_DECIMALS_PRECISION: u32 = 77;

/// Application settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port (default: 3001)
    pub port: u16,

    /// Single origin allowed by CORS, credentials enabled
    pub frontend_url: HeaderValue,

    /// Ethereum JSON-RPC endpoint
    pub rpc_url: String,

    /// Uniswap V3 pool whose slot0 is priced
    pub pool_address: Address,

    /// Fractional digits kept by the integer price division
    pub price_decimals_precision: u32,

    /// Upper bound for one full oracle query
    pub rpc_timeout: Duration,
}

impl Config {
    /// Load settings from the process environment
    ///
    /// # Optional Environment Variables
    ///
    /// - `PORT`: listening port (default 3001)
    /// - `FRONTEND_URL`: allowed CORS origin (default `http://localhost:3000`)
    /// - `ETH_RPC_URL`: JSON-RPC endpoint (default: public Ethereum node)
    /// - `POOL_ADDRESS`: Uniswap V3 pool (default: WETH/USDT)
    /// - `PRICE_DECIMALS_PRECISION`: fixed-point digits (default 18)
    /// - `RPC_TIMEOUT_SECS`: oracle query timeout (default 10)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3001")
            .parse()
            .context("PORT must be a valid number")?;

        let frontend_url = HeaderValue::from_str(&var("FRONTEND_URL", DEFAULT_FRONTEND_URL))
            .context("FRONTEND_URL must be a valid header value")?;

        let pool_address = var("POOL_ADDRESS", DEFAULT_POOL_ADDRESS)
            .parse::<Address>()
            .context("POOL_ADDRESS must be a 20-byte hex address")?;

        let price_decimals_precision: u32 = var("PRICE_DECIMALS_PRECISION", "18")
            .parse()
            .context("PRICE_DECIMALS_PRECISION must be a non-negative integer")?;
        if price_decimals_precision > MAX_PRICE_DECIMALS_PRECISION {
            anyhow::bail!(
                "PRICE_DECIMALS_PRECISION must be at most {MAX_PRICE_DECIMALS_PRECISION}, got {price_decimals_precision}"
            );
        }

        let timeout_secs: u64 = var("RPC_TIMEOUT_SECS", "10")
            .parse()
            .context("RPC_TIMEOUT_SECS must be a number of seconds")?;
        if timeout_secs == 0 {
            anyhow::bail!("RPC_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            port,
            frontend_url,
            rpc_url: var("ETH_RPC_URL", DEFAULT_RPC_URL),
            pool_address,
            price_decimals_precision,
            rpc_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Oracle settings derived from this config
    pub fn oracle_config(&self) -> OracleConfig {
        OracleConfig {
            pool_address: self.pool_address,
            rpc_url: self.rpc_url.clone(),
            price_decimals_precision: self.price_decimals_precision,
        }
    }
}

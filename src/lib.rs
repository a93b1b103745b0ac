//! ETH Price API Library
//!
//! # Overview
//!
//! Backend for a wallet dashboard: an ETH/USDT spot price read from a
//! Uniswap V3 pool, plus mocked portfolio and transaction endpoints.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                       API                        │
//! │                                                  │
//! │   ┌─────────┐     ┌──────────┐     ┌─────────┐   │
//! │   │ Routes  │ ──▶ │ Services │ ──▶ │  Types  │   │
//! │   └─────────┘     └────┬─────┘     └─────────┘   │
//! │                        │                         │
//! └────────────────────────┼─────────────────────────┘
//!                          │ eth_call (read-only)
//!                          ▼
//!                ┌──────────────────┐
//!                │ Uniswap V3 Pool  │
//!                │ + ERC20 tokens   │
//!                └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: environment configuration
//! - `error`: API error type and JSON rendering
//! - `routes`: HTTP handlers and router
//! - `services`: price oracle, pool reader, wallet providers
//! - `types`: wallet data types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eth_price_api::{config::Config, AppState, PriceOracle};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let oracle = PriceOracle::new(config.oracle_config(), config.rpc_timeout)?;
//!     let quote = oracle.quote().await?;
//!     println!("1 ETH ≈ {:.2} USDT", quote.price);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ApiError;
pub use routes::create_router;
pub use services::{OracleConfig, OracleError, PriceOracle, PriceQuote};

use services::{MockPortfolioProvider, MockTransactionProvider, PortfolioProvider, TransactionProvider};

/// 애플리케이션 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub price_oracle: Arc<PriceOracle>,
    pub portfolio: Arc<dyn PortfolioProvider>,
    pub transactions: Arc<dyn TransactionProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State with the mock wallet providers
    pub fn new(config: Config, price_oracle: PriceOracle) -> Self {
        Self {
            price_oracle: Arc::new(price_oracle),
            portfolio: Arc::new(MockPortfolioProvider),
            transactions: Arc::new(MockTransactionProvider),
            config: Arc::new(config),
        }
    }
}

//! Services Module
//!
//! Business logic behind the HTTP routes
//!
//! # Services
//! - `PriceOracle`: Uniswap V3 spot price from `slot0`
//! - `PoolReader`: read-only pool/token contract calls
//! - `PortfolioProvider` / `TransactionProvider`: wallet data (mocked)

mod pool;
mod price_oracle;
mod wallet;

pub use pool::{EthersPoolReader, PoolReader};
pub use price_oracle::{
    compute_raw_price, format_fixed, price_from_sqrt, round_to_cents, OracleConfig, OracleError,
    PriceOracle, PriceQuote,
};
pub use wallet::{MockPortfolioProvider, MockTransactionProvider, PortfolioProvider, TransactionProvider};

//! Price Oracle Service
//!
//! Spot price of a Uniswap V3 pool, read straight from `slot0`.
//!
//! # Formula
//!
//! `sqrtPriceX96` is `sqrt(token1 / token0) * 2^96` in raw token units, so
//!
//! ```text
//! raw = sqrtPriceX96^2 * 10^decimals0 * 10^P
//!       ------------------------------------   (floor division)
//!              2^192 * 10^decimals1
//! ```
//!
//! is the price of one token0 in token1 scaled by `10^P`. The square of a
//! 160-bit value needs up to 320 bits, so every step runs on `BigUint` and
//! only the final fixed-point string is turned into an `f64`.
//!
//! Each call to [`PriceOracle::quote`] is a fresh read: nothing is cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ethers::{types::Address, utils::to_checksum};
use num_bigint::BigUint;
use num_traits::One;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use super::pool::{EthersPoolReader, PoolReader};

/// Oracle settings fixed at construction
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub pool_address: Address,
    pub rpc_url: String,
    /// Fractional digits kept by the integer division (18 upstream)
    pub price_decimals_precision: u32,
}

/// Why a quote could not be produced
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    /// Node unreachable or transport failure
    #[error("price oracle unavailable: {0}")]
    Unavailable(String),

    /// Node answered, but the answer was unusable (revert, bad ABI data)
    #[error("malformed oracle response: {0}")]
    Malformed(String),

    #[error("price oracle timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid oracle configuration: {0}")]
    InvalidConfig(String),
}

/// One pool read and the price derived from it
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub pool: Address,
    pub token0: Address,
    pub token1: Address,
    pub token0_decimals: u8,
    pub token1_decimals: u8,
    pub sqrt_price_x96: BigUint,
    /// Lossless fixed-point rendering of the price
    pub price_fixed: String,
    /// token1 per token0 (USDT per ETH for the default pool)
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    /// Price rounded for display
    pub fn display_price(&self) -> f64 {
        round_to_cents(self.price)
    }

    /// 사람이 읽는 요약 (주소는 EIP-55 체크섬 형식)
    pub fn report(&self) -> String {
        format!(
            "Token0 Address: {}\n\
             Token1 Address: {}\n\
             Token0 Decimals: {}\n\
             Token1 Decimals: {}\n\
             SqrtPriceX96: {}\n\
             1 ETH ≈ {:.2} USDT",
            to_checksum(&self.token0, None),
            to_checksum(&self.token1, None),
            self.token0_decimals,
            self.token1_decimals,
            self.sqrt_price_x96,
            self.display_price(),
        )
    }
}

/// Uniswap V3 가격 오라클 (slot0 기반 현물 가격)
pub struct PriceOracle {
    reader: Arc<dyn PoolReader>,
    config: OracleConfig,
    timeout: Duration,
}

impl PriceOracle {
    /// Oracle backed by a JSON-RPC node at `config.rpc_url`
    pub fn new(config: OracleConfig, timeout: Duration) -> Result<Self, OracleError> {
        let reader = EthersPoolReader::new(&config.rpc_url, config.pool_address, timeout)?;
        Ok(Self::with_reader(Arc::new(reader), config, timeout))
    }

    /// Oracle over any [`PoolReader`]
    pub fn with_reader(reader: Arc<dyn PoolReader>, config: OracleConfig, timeout: Duration) -> Self {
        Self {
            reader,
            config,
            timeout,
        }
    }

    /// Read the pool and compute its current price.
    ///
    /// Any failed read fails the whole quote. The full query is bounded by
    /// the configured timeout and is never retried.
    pub async fn quote(&self) -> Result<PriceQuote, OracleError> {
        tokio::time::timeout(self.timeout, self.fetch_quote())
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))?
    }

    async fn fetch_quote(&self) -> Result<PriceQuote, OracleError> {
        let reader = self.reader.as_ref();

        // slot0 does not depend on the token lookups
        let (token0, token1, sqrt_price_x96) =
            tokio::try_join!(reader.token0(), reader.token1(), reader.sqrt_price_x96())?;
        let (token0_decimals, token1_decimals) =
            tokio::try_join!(reader.token_decimals(token0), reader.token_decimals(token1))?;

        tracing::debug!(
            pool = ?self.config.pool_address,
            ?token0,
            ?token1,
            token0_decimals,
            token1_decimals,
            %sqrt_price_x96,
            "pool state read"
        );

        let precision = self.config.price_decimals_precision;
        let raw = compute_raw_price(&sqrt_price_x96, token0_decimals, token1_decimals, precision);
        let price_fixed = format_fixed(&raw, precision);
        let price = parse_fixed(&price_fixed)?;

        tracing::info!(price = %format!("{:.2}", price), "pool price computed");

        Ok(PriceQuote {
            pool: self.config.pool_address,
            token0,
            token1,
            token0_decimals,
            token1_decimals,
            sqrt_price_x96,
            price_fixed,
            price,
            fetched_at: Utc::now(),
        })
    }
}

/// `sqrtPriceX96^2 * 10^d0 * 10^p / (2^192 * 10^d1)`, floored
pub fn compute_raw_price(
    sqrt_price_x96: &BigUint,
    token0_decimals: u8,
    token1_decimals: u8,
    precision: u32,
) -> BigUint {
    let ten = BigUint::from(10u32);
    let q192 = BigUint::one() << 192u32;

    let numerator = sqrt_price_x96 * sqrt_price_x96
        * ten.pow(u32::from(token0_decimals))
        * ten.pow(precision);
    let denominator = q192 * ten.pow(u32::from(token1_decimals));

    numerator / denominator
}

/// Render `raw / 10^precision` with exactly `precision` fractional digits
pub fn format_fixed(raw: &BigUint, precision: u32) -> String {
    let digits = raw.to_str_radix(10);
    let scale = precision as usize;
    if scale == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = scale + 1);
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    format!("{whole}.{fraction}")
}

fn parse_fixed(fixed: &str) -> Result<f64, OracleError> {
    fixed
        .parse::<f64>()
        .map_err(|e| OracleError::Malformed(format!("price {fixed:?}: {e}")))
}

/// Price of token0 in token1 as `f64`
pub fn price_from_sqrt(
    sqrt_price_x96: &BigUint,
    token0_decimals: u8,
    token1_decimals: u8,
    precision: u32,
) -> Result<f64, OracleError> {
    let raw = compute_raw_price(sqrt_price_x96, token0_decimals, token1_decimals, precision);
    parse_fixed(&format_fixed(&raw, precision))
}

/// Round to 2 decimal places on the exact decimal value of `value`,
/// ties away from zero (`1.115` is stored as `1.11499…` and stays `1.11`).
pub fn round_to_cents(value: f64) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        // outside Decimal's range there are no cents left to round
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn q96() -> BigUint {
        BigUint::one() << 96u32
    }

    fn price(sqrt: &BigUint, d0: u8, d1: u8) -> f64 {
        price_from_sqrt(sqrt, d0, d1, 18).unwrap()
    }

    struct StaticReader {
        sqrt_price_x96: BigUint,
        decimals: (u8, u8),
        failure: Option<OracleError>,
    }

    fn token(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    #[async_trait]
    impl PoolReader for StaticReader {
        async fn token0(&self) -> Result<Address, OracleError> {
            Ok(token(1))
        }

        async fn token1(&self) -> Result<Address, OracleError> {
            Ok(token(2))
        }

        async fn token_decimals(&self, t: Address) -> Result<u8, OracleError> {
            if let Some(err) = &self.failure {
                return Err(err.clone());
            }
            Ok(if t == token(1) { self.decimals.0 } else { self.decimals.1 })
        }

        async fn sqrt_price_x96(&self) -> Result<BigUint, OracleError> {
            Ok(self.sqrt_price_x96.clone())
        }
    }

    struct StalledReader;

    #[async_trait]
    impl PoolReader for StalledReader {
        async fn token0(&self) -> Result<Address, OracleError> {
            std::future::pending().await
        }

        async fn token1(&self) -> Result<Address, OracleError> {
            Ok(token(2))
        }

        async fn token_decimals(&self, _: Address) -> Result<u8, OracleError> {
            Ok(18)
        }

        async fn sqrt_price_x96(&self) -> Result<BigUint, OracleError> {
            Ok(q96())
        }
    }

    fn oracle(reader: impl PoolReader + 'static, timeout: Duration) -> PriceOracle {
        let config = OracleConfig {
            pool_address: token(99),
            rpc_url: "http://localhost:8545".to_string(),
            price_decimals_precision: 18,
        };
        PriceOracle::with_reader(Arc::new(reader), config, timeout)
    }

    #[test]
    fn test_zero_sqrt_price_is_zero() {
        let zero = BigUint::from(0u32);
        assert_eq!(compute_raw_price(&zero, 18, 6, 18), zero);
        assert_eq!(price(&zero, 18, 6), 0.0);
    }

    #[test]
    fn test_unit_price_with_equal_decimals() {
        let raw = compute_raw_price(&q96(), 18, 18, 18);
        assert_eq!(format_fixed(&raw, 18), "1.000000000000000000");
        assert_eq!(round_to_cents(price(&q96(), 18, 18)), 1.00);
    }

    #[test]
    fn test_price_scales_with_square_of_sqrt_price() {
        for k in [2u32, 3, 7, 1000] {
            let scaled = q96() * BigUint::from(k);
            let expected = f64::from(k) * f64::from(k);
            assert_eq!(price(&scaled, 18, 18), expected);
        }
    }

    #[test]
    fn test_decimals_shift_price_by_powers_of_ten() {
        assert_eq!(price(&q96(), 19, 18), 10.0);
        assert_eq!(price(&q96(), 18, 19), 0.1);
        assert_eq!(price(&q96(), 18, 6), 1_000_000_000_000.0);
    }

    #[test]
    fn test_weth_usdt_price() {
        // sqrt(2500 * 10^6 / 10^18) = 5e-5, i.e. 2^96 / 20000
        let sqrt = q96() / BigUint::from(20_000u32);
        let p = price(&sqrt, 18, 6);

        assert!((p - 2500.0).abs() < 1e-6, "got {p}");
        assert_eq!(round_to_cents(p), 2500.00);
    }

    #[test]
    fn test_intermediate_product_is_not_truncated() {
        let max_uint160 = (BigUint::one() << 160u32) - BigUint::one();
        let raw = compute_raw_price(&max_uint160, 18, 0, 18);

        // ~2^128 * 10^36: far past any fixed-width integer
        assert!(raw.bits() > 240);
        assert_eq!(raw, (&max_uint160 * &max_uint160 * BigUint::from(10u32).pow(36)) >> 192u32);
    }

    #[test]
    fn test_format_fixed_keeps_every_digit() {
        assert_eq!(format_fixed(&BigUint::from(0u32), 18), "0.000000000000000000");
        assert_eq!(format_fixed(&BigUint::from(5u32), 3), "0.005");
        assert_eq!(format_fixed(&BigUint::from(123_456u32), 3), "123.456");
        assert_eq!(format_fixed(&BigUint::from(42u32), 0), "42");
    }

    #[test]
    fn test_precision_truncates_instead_of_rounding() {
        // 2^96 / 3 squared is 1/9 minus a hair: floor keeps 0.11
        let sqrt = q96() / BigUint::from(3u32);
        let raw = compute_raw_price(&sqrt, 18, 18, 2);
        assert_eq!(format_fixed(&raw, 2), "0.11");
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(2512.3456), 2512.35);
        assert_eq!(round_to_cents(2512.344), 2512.34);
        assert_eq!(round_to_cents(0.0), 0.0);
    }

    #[test]
    fn test_round_to_cents_uses_exact_decimal_value() {
        // 1.115 is 1.11499999999999999111… as f64, so it rounds down
        assert_eq!(round_to_cents(1.115), 1.11);
        // 0.125 is exact in binary: a true tie, rounded away from zero
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(2.675), 2.67);
        assert_eq!(round_to_cents(1e30), 1e30);
    }

    #[tokio::test]
    async fn test_quote_reads_pool_state() {
        let reader = StaticReader {
            sqrt_price_x96: q96() / BigUint::from(20_000u32),
            decimals: (18, 6),
            failure: None,
        };
        let quote = oracle(reader, Duration::from_secs(5)).quote().await.unwrap();

        assert_eq!(quote.pool, token(99));
        assert_eq!(quote.token0, token(1));
        assert_eq!(quote.token1, token(2));
        assert_eq!((quote.token0_decimals, quote.token1_decimals), (18, 6));
        assert!(quote.price_fixed.starts_with("2499.99999999999"));
        assert_eq!(quote.price_fixed.split('.').nth(1).map(str::len), Some(18));
        assert_eq!(quote.display_price(), 2500.00);
    }

    #[test]
    fn test_report_uses_checksummed_addresses() {
        let quote = PriceQuote {
            pool: token(99),
            token0: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".parse().unwrap(),
            token1: "0xdac17f958d2ee523a2206206994597c13d831ec7".parse().unwrap(),
            token0_decimals: 18,
            token1_decimals: 6,
            sqrt_price_x96: q96(),
            price_fixed: "2512.344000000000000000".to_string(),
            price: 2512.344,
            fetched_at: Utc::now(),
        };
        let report = quote.report();

        assert!(report.contains("Token0 Address: 0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
        assert!(report.contains("Token1 Address: 0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(report.contains("Token1 Decimals: 6"));
        assert!(report.ends_with("1 ETH ≈ 2512.34 USDT"));
    }

    #[tokio::test]
    async fn test_quote_propagates_read_failure() {
        let reader = StaticReader {
            sqrt_price_x96: q96(),
            decimals: (18, 6),
            failure: Some(OracleError::Unavailable("connection refused".to_string())),
        };
        let result = oracle(reader, Duration::from_secs(5)).quote().await;

        assert!(matches!(result, Err(OracleError::Unavailable(msg)) if msg == "connection refused"));
    }

    #[tokio::test]
    async fn test_quote_times_out() {
        let timeout = Duration::from_millis(20);
        let result = oracle(StalledReader, timeout).quote().await;

        assert!(matches!(result, Err(OracleError::Timeout(d)) if d == timeout));
    }
}

//! Uniswap V3 Pool Reader
//!
//! Read-only contract calls needed to price a pool. The [`PoolReader`]
//! trait is the network seam of the oracle; [`EthersPoolReader`] talks to
//! a JSON-RPC node through `ethers` bindings.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ethers::{
    contract::{abigen, ContractError},
    providers::{Http, Provider},
    types::{Address, U256},
};
use num_bigint::BigUint;
use reqwest::Url;

use super::price_oracle::OracleError;

abigen!(
    UniswapV3Pool,
    r#"[
        function slot0() view returns (uint160 sqrtPriceX96, int24 tick, uint16 observationIndex, uint16 observationCardinality, uint16 observationCardinalityNext, uint8 feeProtocol, bool unlocked)
        function token0() view returns (address)
        function token1() view returns (address)
    ]"#,
);

abigen!(
    Erc20Token,
    r#"[
        function decimals() view returns (uint8)
    ]"#,
);

/// Read-only view of a single pool and its tokens
#[async_trait]
pub trait PoolReader: Send + Sync {
    /// Address of the pool's token0
    async fn token0(&self) -> Result<Address, OracleError>;

    /// Address of the pool's token1
    async fn token1(&self) -> Result<Address, OracleError>;

    /// `decimals()` of an ERC20 token
    async fn token_decimals(&self, token: Address) -> Result<u8, OracleError>;

    /// `slot0().sqrtPriceX96`, the rest of the tuple is dropped
    async fn sqrt_price_x96(&self) -> Result<BigUint, OracleError>;
}

/// [`PoolReader`] over an HTTP JSON-RPC provider
pub struct EthersPoolReader {
    client: Arc<Provider<Http>>,
    pool: UniswapV3Pool<Provider<Http>>,
}

impl EthersPoolReader {
    /// Build a reader for `pool_address`. No request is made here, so a
    /// node that is down does not prevent startup.
    pub fn new(rpc_url: &str, pool_address: Address, timeout: Duration) -> Result<Self, OracleError> {
        let url = Url::parse(rpc_url)
            .map_err(|e| OracleError::InvalidConfig(format!("rpc url {rpc_url}: {e}")))?;
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::InvalidConfig(format!("http client: {e}")))?;

        let client = Arc::new(Provider::new(Http::new_with_client(url, http_client)));
        let pool = UniswapV3Pool::new(pool_address, client.clone());

        Ok(Self { client, pool })
    }
}

#[async_trait]
impl PoolReader for EthersPoolReader {
    async fn token0(&self) -> Result<Address, OracleError> {
        self.pool.token_0().call().await.map_err(classify)
    }

    async fn token1(&self) -> Result<Address, OracleError> {
        self.pool.token_1().call().await.map_err(classify)
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, OracleError> {
        Erc20Token::new(token, self.client.clone())
            .decimals()
            .call()
            .await
            .map_err(classify)
    }

    async fn sqrt_price_x96(&self) -> Result<BigUint, OracleError> {
        let (sqrt_price_x96, ..) = self.pool.slot_0().call().await.map_err(classify)?;
        Ok(u256_to_biguint(sqrt_price_x96))
    }
}

/// Transport failures mean the node is unreachable; everything else means
/// the node answered with something we cannot use.
fn classify(err: ContractError<Provider<Http>>) -> OracleError {
    match err {
        ContractError::ProviderError { e } | ContractError::MiddlewareError { e } => {
            OracleError::Unavailable(e.to_string())
        }
        other => OracleError::Malformed(other.to_string()),
    }
}

fn u256_to_biguint(value: U256) -> BigUint {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

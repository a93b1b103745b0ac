//! Price Endpoint
//!
//! Every request is a fresh pool read. There is no cache and no fallback
//! value: if the oracle fails the client gets a 500, never a price of 0.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::ApiError, types::iso_timestamp, AppState};

pub const PRICE_SOURCE: &str = "Uniswap V3";

/// Price response
#[derive(Debug, Serialize)]
pub struct EthPriceResponse {
    pub success: bool,
    /// USDT per ETH, rounded to 2 decimal places
    pub price: f64,
    pub timestamp: String,
    pub source: String,
}

/// GET /api/eth-price
///
/// ```json
/// {
///   "success": true,
///   "price": 2512.34,
///   "timestamp": "2024-01-15T10:30:00.000Z",
///   "source": "Uniswap V3"
/// }
/// ```
pub async fn get_eth_price(
    State(state): State<AppState>,
) -> Result<Json<EthPriceResponse>, ApiError> {
    let quote = state.price_oracle.quote().await?;

    Ok(Json(EthPriceResponse {
        success: true,
        price: quote.display_price(),
        timestamp: iso_timestamp(quote.fetched_at),
        source: PRICE_SOURCE.to_string(),
    }))
}

//! API Routes Module
//!
//! All HTTP endpoints
//!
//! # Routes
//! - `/api/health` - health check
//! - `/api/eth-price` - ETH/USDT spot price from Uniswap V3
//! - `/api/portfolio/:address` - wallet balances (mock)
//! - `/api/transactions/:address` - wallet history (mock)

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod health;
pub mod portfolio;
pub mod price;
pub mod transactions;

/// Build the application router
///
/// # Route Structure
///
/// ```text
/// GET /api/eth-price                - spot price, 500 on oracle failure
/// GET /api/portfolio/:address       - balances of an address
/// GET /api/transactions/:address    - transfers of an address
/// GET /api/health                   - liveness, never touches the chain
/// ```
pub fn create_router(state: AppState) -> Router {
    // CORS: 프론트엔드 단일 origin + credentials, 메서드/헤더는 요청 그대로 허용
    let cors = CorsLayer::new()
        .allow_origin(state.config.frontend_url.clone())
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/eth-price", get(price::get_eth_price))
        .route("/api/portfolio/:address", get(portfolio::get_portfolio))
        .route("/api/transactions/:address", get(transactions::get_transactions))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

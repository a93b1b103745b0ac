//! Portfolio Endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    types::{now_iso, Portfolio},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub success: bool,
    pub address: String,
    pub portfolio: Portfolio,
    pub timestamp: String,
}

/// GET /api/portfolio/:address
///
/// The address is echoed as given; no format check.
pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<PortfolioResponse> {
    let portfolio = state.portfolio.portfolio(&address).await;

    Json(PortfolioResponse {
        success: true,
        address,
        portfolio,
        timestamp: now_iso(),
    })
}

//! Transaction History Endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    types::{now_iso, Transaction},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub success: bool,
    pub address: String,
    pub transactions: Vec<Transaction>,
    pub timestamp: String,
}

/// GET /api/transactions/:address
pub async fn get_transactions(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<TransactionsResponse> {
    let transactions = state.transactions.transactions(&address).await;
    tracing::debug!(%address, count = transactions.len(), "transactions served");

    Json(TransactionsResponse {
        success: true,
        address,
        transactions,
        timestamp: now_iso(),
    })
}

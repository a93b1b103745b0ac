//! Health Check Endpoint
//!
//! Liveness only: answers even when the RPC node is down, so a load
//! balancer never pulls the API because of the chain.

use axum::Json;
use serde::Serialize;

use crate::types::now_iso;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Backend API is running".to_string(),
        timestamp: now_iso(),
    })
}

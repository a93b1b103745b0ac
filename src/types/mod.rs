//! Common Types Module
//!
//! Wallet data shared by the providers and the HTTP layer. Field names
//! follow the JSON contract consumed by the frontend.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Token balances of a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(rename = "ETH")]
    pub eth: f64,
    #[serde(rename = "USDT")]
    pub usdt: f64,
    #[serde(rename = "totalValueUSD")]
    pub total_value_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Send,
    Receive,
}

/// 거래 상태 (mock 데이터는 모두 확정 상태)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Confirmed,
}

/// A single wallet transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub token: String,
    /// ISO 8601, millisecond precision
    pub timestamp: String,
    pub status: TransactionStatus,
}

/// ISO 8601 timestamp in UTC with millisecond precision (`2024-01-15T10:30:00.000Z`)
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_iso() -> String {
    iso_timestamp(Utc::now())
}

//! Wallet Data Providers
//!
//! Portfolio and transaction history lookups. Only mock implementations
//! exist today; a chain-backed provider plugs in behind the same traits
//! without touching the HTTP layer.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::types::{iso_timestamp, Portfolio, Transaction, TransactionKind, TransactionStatus};

/// Token balances of an address
#[async_trait]
pub trait PortfolioProvider: Send + Sync {
    async fn portfolio(&self, address: &str) -> Portfolio;
}

/// Transfer history of an address, newest first
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn transactions(&self, address: &str) -> Vec<Transaction>;
}

/// Mock 잔고 (주소와 무관하게 고정값)
#[derive(Debug, Clone, Default)]
pub struct MockPortfolioProvider;

#[async_trait]
impl PortfolioProvider for MockPortfolioProvider {
    async fn portfolio(&self, _address: &str) -> Portfolio {
        Portfolio {
            eth: 2.5,
            usdt: 1000.0,
            total_value_usd: 12135.58,
        }
    }
}

/// Three confirmed transfers relative to the current time
#[derive(Debug, Clone, Default)]
pub struct MockTransactionProvider;

#[async_trait]
impl TransactionProvider for MockTransactionProvider {
    async fn transactions(&self, address: &str) -> Vec<Transaction> {
        let now = Utc::now();

        vec![
            Transaction {
                id: 1,
                kind: TransactionKind::Send,
                from: address.to_string(),
                to: "0x1234567890123456789012345678901234567890".to_string(),
                amount: 0.5,
                token: "ETH".to_string(),
                timestamp: iso_timestamp(now - Duration::hours(2)),
                status: TransactionStatus::Confirmed,
            },
            Transaction {
                id: 2,
                kind: TransactionKind::Receive,
                from: "0x9876543210987654321098765432109876543210".to_string(),
                to: address.to_string(),
                amount: 1.2,
                token: "ETH".to_string(),
                timestamp: iso_timestamp(now - Duration::days(1)),
                status: TransactionStatus::Confirmed,
            },
            Transaction {
                id: 3,
                kind: TransactionKind::Send,
                from: address.to_string(),
                to: "0x9999888877776666555544443333222211110000".to_string(),
                amount: 100.0,
                token: "USDT".to_string(),
                timestamp: iso_timestamp(now - Duration::days(3)),
                status: TransactionStatus::Confirmed,
            },
        ]
    }
}

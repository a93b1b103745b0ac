//! ETH Price API Server
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Client (Frontend)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                        │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Routes Layer                       ││
//! │  │  /api/health  /api/eth-price  /api/portfolio/*          ││
//! │  │  /api/transactions/*                                    ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Services Layer                       ││
//! │  │  PriceOracle    PortfolioProvider    TransactionProvider││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Ethereum JSON-RPC (read-only)               │
//! │              Uniswap V3 Pool    ERC20 decimals()            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eth_price_api::{create_router, AppState, Config, PriceOracle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화 (RUST_LOG 가 있으면 우선)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "eth_price_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting ETH Price API Server");

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!(
        pool = ?config.pool_address,
        rpc_url = %config.rpc_url,
        timeout = ?config.rpc_timeout,
        "📋 Configuration loaded"
    );

    // 서비스 초기화 (RPC 연결은 첫 요청 때)
    let price_oracle = PriceOracle::new(config.oracle_config(), config.rpc_timeout)
        .context("failed to build price oracle")?;
    tracing::info!("💰 Price Oracle ready");

    // 라우터 구성
    let port = config.port;
    let app = create_router(AppState::new(config, price_oracle));

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("🌐 Backend API server running on http://localhost:{}", port);
    tracing::info!("📊 ETH Price API: http://localhost:{}/api/eth-price", port);
    tracing::info!("💼 Portfolio API: http://localhost:{}/api/portfolio/:address", port);
    tracing::info!("📝 Transactions API: http://localhost:{}/api/transactions/:address", port);
    tracing::info!("🏥 Health Check: http://localhost:{}/api/health", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutting down");
}

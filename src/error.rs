//! Error Handling Module
//!
//! Maps failures to the API's JSON error shape with the proper HTTP status.
//! Uses thiserror for domain errors and integrates with tracing for structured logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::OracleError;

/// API 에러 타입
///
/// 모든 variant는 `{"success": false, "error": ..., "code": ...}` 로 응답
/// - 오라클 에러는 노드 연결 실패와 응답 파싱 실패를 구분
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 500 Internal Server Error (oracle) ============
    #[error("Price oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Could not parse price from oracle response: {0}")]
    MalformedResponse(String),

    #[error("Price oracle did not respond in time")]
    OracleTimeout,

    // ============ 500 Internal Server Error ============
    #[error("Internal server error")]
    InternalError,
}

/// API 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::OracleUnavailable(_) => "ORACLE_UNAVAILABLE",
            ApiError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ApiError::OracleTimeout => "ORACLE_TIMEOUT",
            ApiError::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.code(), "{}", self);

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<OracleError> for ApiError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::Unavailable(msg) => ApiError::OracleUnavailable(msg),
            OracleError::Malformed(msg) => ApiError::MalformedResponse(msg),
            OracleError::Timeout(_) => ApiError::OracleTimeout,
            OracleError::InvalidConfig(msg) => {
                tracing::error!("Oracle misconfigured: {}", msg);
                ApiError::InternalError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_oracle_errors_stay_distinguishable() {
        let unavailable = ApiError::from(OracleError::Unavailable("refused".into()));
        let malformed = ApiError::from(OracleError::Malformed("bad abi".into()));
        let timeout = ApiError::from(OracleError::Timeout(Duration::from_secs(10)));

        assert_eq!(unavailable.code(), "ORACLE_UNAVAILABLE");
        assert_eq!(malformed.code(), "MALFORMED_RESPONSE");
        assert_eq!(timeout.code(), "ORACLE_TIMEOUT");
        assert_ne!(unavailable.to_string(), malformed.to_string());
    }

    #[test]
    fn test_every_error_is_500() {
        for err in [
            ApiError::OracleUnavailable("x".into()),
            ApiError::MalformedResponse("x".into()),
            ApiError::OracleTimeout,
            ApiError::InternalError,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

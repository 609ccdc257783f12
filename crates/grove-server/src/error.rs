use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use grove_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error body returned by every failing endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Caller-facing failures of the HTTP API.
///
/// All of these are recoverable from the client's point of view; none of
/// them leaves the ledger partially mutated.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("intent not found")]
    IntentNotFound,

    #[error("planting order not found")]
    OrderNotFound,

    #[error("no such route")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::IntentNotFound | Self::OrderNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public message. Internal details stay in the logs.
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid JSON",
            Self::IntentNotFound => "Intent not found",
            Self::OrderNotFound => "Planting order not found",
            Self::NotFound => "Not found",
            Self::Internal(_) => "Internal error",
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::IntentNotFound(_) => Self::IntentNotFound,
            LedgerError::OrderNotFound(_) => Self::OrderNotFound,
            other => {
                tracing::error!(error = %other, "ledger failure");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_types::{IntentId, OrderId};

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::IntentNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::OrderNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn ledger_errors_map_to_api_errors() {
        let e: ApiError = LedgerError::IntentNotFound(IntentId::from("i")).into();
        assert!(matches!(e, ApiError::IntentNotFound));
        let e: ApiError = LedgerError::OrderNotFound(OrderId::from("o")).into();
        assert!(matches!(e, ApiError::OrderNotFound));
        let e: ApiError = LedgerError::LockPoisoned("write").into();
        assert!(matches!(e, ApiError::Internal(_)));
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let e = ApiError::Internal("lock poisoned at 0xdeadbeef".into());
        assert_eq!(e.public_message(), "Internal error");
    }
}

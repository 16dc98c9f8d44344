use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Failures of a distribution run. Both are fatal to the run and no
/// partial assignment escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("total student count ({students}) exceeds room capacity ({capacity})")]
    CapacityExceeded { students: usize, capacity: u64 },

    /// The round-robin walk found no free seat although the capacity check
    /// passed. This is an engine bug, never a user error.
    #[error("all rooms are full, {unplaced} student(s) of group {group} could not be placed")]
    RoomsExhausted { group: String, unplaced: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Distribution(DistributionError::CapacityExceeded { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "CAPACITY_EXCEEDED")
            }
            ApiError::Distribution(DistributionError::RoomsExhausted { .. }) => {
                error!("distribution stalled: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "ROOMS_EXHAUSTED")
            }
            ApiError::Internal(msg) => {
                error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

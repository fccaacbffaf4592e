//! Unified error type for API responses.
//!
//! Every variant renders as `{"error": <message>}` JSON. The two
//! "nothing found" bodies are fixed strings that clients match on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use breakoutlab_core::data::DataError;
use breakoutlab_core::report::ReportError;
use serde_json::json;

pub const NO_DATA_MESSAGE: &str = "No data found for the given ticker and date range.";
pub const NO_BREAKOUTS_MESSAGE: &str = "No breakout days found.";

#[derive(Debug)]
pub enum ApiError {
    /// The market-data fetch returned nothing for the ticker/range.
    NoData,
    /// Detection yielded zero trades.
    NoBreakouts,
    /// Request failed validation.
    BadRequest(String),
    /// The upstream data source failed.
    Upstream(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => write!(f, "no_data"),
            Self::NoBreakouts => write!(f, "no_breakouts"),
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::Upstream(msg) => write!(f, "upstream_error: {msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::NoData => (StatusCode::NOT_FOUND, NO_DATA_MESSAGE.to_string()),
            Self::NoBreakouts => (StatusCode::NOT_FOUND, NO_BREAKOUTS_MESSAGE.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, format!("invalid input: {msg}")),
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::SymbolNotFound { .. } => Self::NoData,
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

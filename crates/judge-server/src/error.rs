//! JSON error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use judge_stock::StockError;
use serde_json::json;
use tracing::{error, warn};

/// An error answered as `{ "message": ..., "code": ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    /// Malformed caller input
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
        }
    }
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::BAD_GATEWAY);
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.code, "{}", self.message);
        } else {
            warn!(status = %self.status, code = self.code, "{}", self.message);
        }

        let body = Json(json!({
            "message": self.message,
            "code": self.code,
        }));
        (self.status, body).into_response()
    }
}

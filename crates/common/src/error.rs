//! Request errors rendered with the shared `{"error": {...}}` envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Client input error.
///
/// Authentication failures have their own type in the auth crate and
/// startup failures go through `anyhow`; this covers request bodies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Body was not valid JSON for the target type or failed its constraints
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code for the response body
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(error = %self, status = status.as_u16(), "Rejecting request");

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

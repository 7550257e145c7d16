use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Ambient error taxonomy for conditions the transport layer can locally
/// recover from. `analyze` itself is infallible: every input-shaped
/// condition (unsupported language, empty input, a degenerate parse)
/// resolves to the empty-summary shape instead of an error (SPEC_FULL.md
/// §7). These variants exist for the edges outside `analyze` that need a
/// concrete error to map to an HTTP status, patterned on `SliceError` in
/// the teacher's sibling `slicer` crate (a small thiserror enum with one
/// variant per locally-recoverable failure mode).
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("invalid JSON")]
    InvalidJson,

    #[error("internal error")]
    Internal,
}

impl AnalyzeError {
    fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::InvalidJson => StatusCode::BAD_REQUEST,
            AnalyzeError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

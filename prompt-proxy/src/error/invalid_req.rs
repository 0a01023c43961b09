use axum::extract::rejection::BytesRejection;
use axum_core::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::error::api::ErrorResponse;

/// Caller errors. The messages are returned to the caller verbatim.
#[derive(Debug, Error, strum::AsRefStr)]
pub enum InvalidRequestError {
    #[error("Request body is missing.")]
    MissingBody,
    /// The body could not be buffered, e.g. it exceeds the size limit.
    #[error("{}", .0.body_text())]
    UnreadableBody(#[from] BytesRejection),
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(#[from] serde_json::Error),
    #[error("Prompt is missing from the request.")]
    MissingPrompt,
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for InvalidRequestError {
    fn into_response(self) -> axum_core::response::Response {
        debug!(error = %self, kind = self.as_ref(), "invalid request");
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnreadableBody(ref rejection) => rejection.status(),
            Self::MissingBody
            | Self::InvalidRequestBody(_)
            | Self::MissingPrompt => StatusCode::BAD_REQUEST,
        };
        ErrorResponse::new(status, self.to_string()).into_response()
    }
}

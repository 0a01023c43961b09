use axum_core::response::IntoResponse;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use super::{invalid_req::InvalidRequestError, upstream::UpstreamError};

const MISSING_API_KEY_MESSAGE: &str = "API key is not set on the server.";
const PANIC_MESSAGE: &str = "Internal server error";

/// Every error the generate endpoint can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),
    #[error("API key is not set on the server.")]
    MissingApiKey,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Handler panicked: {0}")]
    Panic(String),
}

/// The body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum_core::response::Response {
        (self.status, axum::Json(self)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum_core::response::Response {
        match self {
            ApiError::InvalidRequest(error) => error.into_response(),
            ApiError::MissingApiKey => {
                tracing::warn!("rejecting request, upstream api key is not set");
                ErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MISSING_API_KEY_MESSAGE,
                )
                .into_response()
            }
            ApiError::Upstream(error) => {
                match &error {
                    UpstreamError::Rejected { status, body } => {
                        tracing::error!(
                            status = status.as_u16(),
                            body = %body,
                            "Google API error"
                        );
                    }
                    UpstreamError::Transport(_) | UpstreamError::Decode(_) => {
                        tracing::error!(
                            error = %error,
                            kind = error.as_ref(),
                            "internal server error"
                        );
                    }
                }
                ErrorResponse::new(error.status(), error.to_string())
                    .into_response()
            }
            ApiError::Panic(details) => {
                tracing::error!(details = %details, "handler panicked");
                ErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PANIC_MESSAGE,
                )
                .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn into_parts(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn missing_api_key_is_a_server_error() {
        let (status, body) = into_parts(ApiError::MissingApiKey).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "API key is not set on the server." })
        );
    }

    #[tokio::test]
    async fn missing_body_is_a_bad_request() {
        let (status, body) =
            into_parts(InvalidRequestError::MissingBody.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Request body is missing." })
        );
    }

    #[tokio::test]
    async fn upstream_rejection_relays_status() {
        let error = UpstreamError::Rejected {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "overloaded".to_string(),
        };
        let (status, body) = into_parts(error.into()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Google API request failed: overloaded" })
        );
    }

    #[tokio::test]
    async fn panic_details_are_not_exposed() {
        let (status, body) =
            into_parts(ApiError::Panic("index out of bounds".to_string()))
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Internal server error" })
        );
    }
}

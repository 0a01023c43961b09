pub mod generate;

use axum::extract::OriginalUri;

use crate::error::invalid_req::InvalidRequestError;

/// The path the generate endpoint is served on.
pub const GENERATE_PATH: &str = "/generate";
pub const HEALTH_PATH: &str = "/health";

pub(crate) async fn health() {}

pub(crate) async fn not_found(
    OriginalUri(uri): OriginalUri,
) -> InvalidRequestError {
    InvalidRequestError::NotFound(uri.path().to_string())
}

use axum::{
    Json,
    extract::{State, rejection::BytesRejection},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::{
    app_state::AppState,
    error::{api::ApiError, invalid_req::InvalidRequestError},
    types::{gemini::GenerateContentRequest, request::GenerateRequest},
};

/// Forwards the caller's prompt to the upstream with the server-held key.
///
/// Validation is fail-fast and ordered: body present, body parses, key
/// configured, prompt present.
#[tracing::instrument(name = "generate", skip_all)]
pub async fn handler(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(InvalidRequestError::from)?;
    if body.is_empty() {
        return Err(InvalidRequestError::MissingBody.into());
    }
    let request = GenerateRequest::from_slice(&body)
        .map_err(InvalidRequestError::from)?;
    let api_key = app_state.api_key().ok_or(ApiError::MissingApiKey)?;
    let prompt = request
        .into_prompt()
        .ok_or(InvalidRequestError::MissingPrompt)?;

    tracing::debug!(prompt_len = prompt.len(), "forwarding prompt upstream");
    let payload = GenerateContentRequest::from_prompt(prompt);
    let result = app_state
        .client()
        .generate_content(api_key, &payload)
        .await?;

    Ok(Json(result).into_response())
}

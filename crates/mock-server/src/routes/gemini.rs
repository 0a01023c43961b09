use axum::{
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::{HeaderMap, StatusCode, header};

use crate::{AppState, RecordedRequest};

pub const RESPONSE: &str = include_str!(
    "../../../../prompt-proxy/stubs/gemini/generate_content_success.json"
);

const GENERATE_CONTENT_SUFFIX: &str = ":generateContent";

pub(crate) async fn generate_content(
    State(state): State<AppState>,
    Path(model_action): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(model) = model_action.strip_suffix(GENERATE_CONTENT_SUFFIX) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    tracing::debug!(model, "received generateContent request");

    state.recorder.record(RecordedRequest {
        model: model.to_string(),
        query,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
        body,
    });

    if state.gemini_latency > 0 {
        crate::routes::sleep(state.gemini_latency).await;
    }

    let status = StatusCode::from_u16(state.gemini_status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = state
        .gemini_body
        .as_deref()
        .unwrap_or(RESPONSE)
        .to_string();
    let content_type = if status.is_success() {
        "application/json"
    } else {
        "text/plain"
    };
    (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

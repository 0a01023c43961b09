use http::StatusCode;
use thiserror::Error;

/// The ways a single upstream `generateContent` call can fail.
#[derive(Debug, Error, strum::AsRefStr)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status.
    #[error("Google API request failed: {body}")]
    Rejected { status: StatusCode, body: String },
    /// Sending the request or reading the response failed.
    ///
    /// The request url carries the API key, so it must be stripped with
    /// [`reqwest::Error::without_url`] before constructing this variant.
    #[error("{0}")]
    Transport(reqwest::Error),
    /// The upstream answered with a success status but the body is not JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url())
    }

    /// The status code relayed to the caller.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

use displaydoc::Display;
use thiserror::Error;

/// Errors that can occur while the server is starting up.
#[derive(Debug, Error, Display)]
pub enum InitError {
    /// Failed to read config: {0}
    Config(#[from] Box<crate::config::Error>),
    /// Telemetry: {0}
    Telemetry(#[from] telemetry::TelemetryError),
    /// Failed to build http client: {0}
    HttpClient(reqwest::Error),
    /// Invalid upstream url: {0}
    InvalidUpstreamUrl(#[from] url::ParseError),
    /// Upstream model must not be empty
    EmptyModel,
    /// Upstream base url must use http or https, got: {0}
    UnsupportedScheme(String),
}

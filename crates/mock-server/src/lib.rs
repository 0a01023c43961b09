pub mod routes;

use std::{
    io,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use axum::{Router, routing::post};
use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    ParseConfig(#[from] serde_yml::Error),
    #[error("failed to bind {address}: {source}")]
    Bind { address: String, source: io::Error },
    #[error("server error: {0}")]
    Serve(io::Error),
}

/// A request received by the fake Gemini endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// The model segment of the path, without the `:generateContent` action.
    pub model: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    fn record(&self, request: RecordedRequest) {
        // a poisoned lock only means another handler panicked mid-push
        let mut requests = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        requests.push(request);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppState {
    #[serde(default = "default_provider_latency")]
    pub gemini_latency: u32,
    /// Status code returned by the generateContent route.
    #[serde(default = "default_gemini_status")]
    pub gemini_status: u16,
    /// Response body override. The canned success response is used when
    /// unset.
    #[serde(default)]
    pub gemini_body: Option<String>,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(skip)]
    pub recorder: Recorder,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            gemini_latency: default_provider_latency(),
            gemini_status: default_gemini_status(),
            gemini_body: None,
            address: default_address(),
            port: default_port(),
            recorder: Recorder::default(),
        }
    }
}

impl AppState {
    /// A state that answers immediately with the given status and body.
    #[must_use]
    pub fn responding_with(status: u16, body: impl Into<String>) -> Self {
        Self {
            gemini_latency: 0,
            gemini_status: status,
            gemini_body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Parses a YAML config. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let yaml =
            std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml(&yaml)
    }

    fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

fn default_provider_latency() -> u32 {
    60
}

fn default_gemini_status() -> u16 {
    200
}

fn default_address() -> String {
    "[::]".to_string()
}

fn default_port() -> u16 {
    5150
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/v1beta/models/{model_action}",
            post(routes::gemini::generate_content),
        )
        .with_state(app_state)
}

/// Serves the mock on its configured address until the process exits.
pub async fn serve(app_state: AppState) -> Result<(), Error> {
    let address = app_state.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| Error::Bind { address, source })?;
    if let Ok(local) = listener.local_addr() {
        tracing::info!(address = %local, "mock server listening");
    }
    axum::serve(listener, router(app_state))
        .await
        .map_err(Error::Serve)
}

/// Serves the mock on an ephemeral loopback port in a background task and
/// returns the bound address.
pub async fn spawn(app_state: AppState) -> Result<SocketAddr, Error> {
    let app_state = AppState {
        address: "127.0.0.1".to_string(),
        port: 0,
        ..app_state
    };
    let address = app_state.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| Error::Bind { address, source })?;
    let local = listener.local_addr().map_err(Error::Serve)?;
    tokio::spawn(async move {
        if let Err(error) = axum::serve(listener, router(app_state)).await {
            tracing::error!(%error, "mock server stopped");
        }
    });
    Ok(local)
}

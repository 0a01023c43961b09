#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use axum::body::Body;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::RecordedRequest;
use prompt_proxy::{app::App, config::Config, types::secret::Secret};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;
use url::Url;

pub const API_KEY: &str = "test-api-key";

/// The proxy's router wired to a mock Gemini upstream.
pub struct Harness {
    pub app: App,
    pub mock: mock_server::AppState,
}

impl Harness {
    /// A harness whose upstream answers with the canned success response.
    pub async fn success() -> Self {
        Self::with_mock(mock_server::AppState {
            gemini_latency: 0,
            ..Default::default()
        })
        .await
    }

    pub async fn with_mock(mock: mock_server::AppState) -> Self {
        Self::builder(mock).api_key(Some(API_KEY)).build().await
    }

    pub fn builder(mock: mock_server::AppState) -> HarnessBuilder {
        HarnessBuilder {
            mock,
            api_key: None,
            base_url: None,
        }
    }

    pub async fn call(&self, request: Request<Body>) -> http::Response<Body> {
        self.app.router.clone().oneshot(request).await.unwrap()
    }

    /// Posts `body` to the generate endpoint and collects the response.
    pub async fn generate(&self, body: impl Into<Body>) -> (StatusCode, Bytes) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("http://localhost/generate")
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        let response = self.call(request).await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    pub fn upstream_requests(&self) -> Vec<RecordedRequest> {
        self.mock.recorder.requests()
    }
}

pub struct HarnessBuilder {
    mock: mock_server::AppState,
    api_key: Option<&'static str>,
    base_url: Option<Url>,
}

impl HarnessBuilder {
    pub fn api_key(mut self, api_key: Option<&'static str>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Points the proxy somewhere other than the mock.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(Url::parse(base_url).unwrap());
        self
    }

    pub async fn build(self) -> Harness {
        let addr = mock_server::spawn(self.mock.clone()).await.unwrap();
        let mut config = Config::default();
        config.upstream.base_url = self
            .base_url
            .unwrap_or_else(|| Url::parse(&format!("http://{addr}")).unwrap());
        config.upstream.api_key =
            self.api_key.map(|key| Secret::from(key.to_string()));
        let app = App::new(config).unwrap();
        Harness {
            app,
            mock: self.mock,
        }
    }
}

pub fn error_message(body: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(body).unwrap();
    value["error"]
        .as_str()
        .expect("error bodies have a string `error` field")
        .to_string()
}

/// Log output captured by [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Records this crate's log output on the current thread until the guard is
/// dropped. `#[tokio::test]` runs on a single thread, so the handler's logs
/// are included.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("prompt_proxy=trace,tower_http=debug")
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

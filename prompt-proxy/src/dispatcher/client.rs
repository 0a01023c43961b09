use serde_json::value::RawValue;
use tracing::{Instrument, debug, info_span};
use url::Url;

use crate::{
    config::upstream::UpstreamConfig,
    error::{init::InitError, upstream::UpstreamError},
    types::{gemini::GenerateContentRequest, secret::Secret},
};

/// Sends `generateContent` requests to the configured upstream.
///
/// Cheap to clone, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
    endpoint: Url,
}

impl Client {
    pub fn new(config: &UpstreamConfig) -> Result<Self, InitError> {
        // no timeouts, the client defaults apply
        let inner = reqwest::Client::builder()
            .tcp_nodelay(true)
            .build()
            .map_err(InitError::HttpClient)?;
        let endpoint = config.generate_content_url()?;
        Ok(Self { inner, endpoint })
    }

    /// The upstream url without the credential.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Makes exactly one attempt; every failure is returned to the caller.
    ///
    /// On success the upstream body is returned as raw JSON so it can be
    /// relayed without being re-serialized.
    pub async fn generate_content(
        &self,
        api_key: &Secret<String>,
        payload: &GenerateContentRequest,
    ) -> Result<Box<RawValue>, UpstreamError> {
        async {
            let response = self
                .inner
                .post(self.endpoint.clone())
                .query(&[("key", api_key.expose())])
                .json(payload)
                .send()
                .await
                .map_err(UpstreamError::transport)?;

            let status = response.status();
            debug!(status = status.as_u16(), "received upstream response");
            if !status.is_success() {
                let body =
                    response.text().await.map_err(UpstreamError::transport)?;
                return Err(UpstreamError::Rejected { status, body });
            }

            let bytes =
                response.bytes().await.map_err(UpstreamError::transport)?;
            let result = serde_json::from_slice::<Box<RawValue>>(&bytes)?;
            Ok(result)
        }
        .instrument(info_span!("upstream", endpoint = %self.endpoint))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_never_contains_the_key() {
        let config = UpstreamConfig {
            api_key: Some(Secret::from("AIza-secret".to_string())),
            ..Default::default()
        };
        let client = Client::new(&config).unwrap();
        assert!(!client.endpoint().as_str().contains("AIza-secret"));
        assert!(client.endpoint().query().is_none());
    }

    #[tokio::test]
    async fn connection_failure_does_not_leak_the_key() {
        // nothing listens on the discard port of the loopback interface
        let config = UpstreamConfig {
            base_url: Url::parse("http://127.0.0.1:9").unwrap(),
            ..Default::default()
        };
        let client = Client::new(&config).unwrap();
        let key = Secret::from("AIza-secret".to_string());
        let error = client
            .generate_content(
                &key,
                &GenerateContentRequest::from_prompt("Hello".to_string()),
            )
            .await
            .unwrap_err();
        assert!(matches!(error, UpstreamError::Transport(_)));
        assert!(!error.to_string().contains("AIza-secret"));
        assert!(!format!("{error:?}").contains("AIza-secret"));
    }
}

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{error::init::InitError, types::secret::Secret};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Where generate requests are forwarded to and with which credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub model: String,
    /// Usually supplied through `GOOGLE_API_KEY` rather than the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<Secret<String>>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL)
                .expect("always valid if tests pass"),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl UpstreamConfig {
    /// `{base-url}/v1beta/models/{model}:generateContent`, without the key.
    pub fn generate_content_url(&self) -> Result<Url, InitError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!(
            "{base}/v1beta/models/{}:generateContent",
            self.model
        ))?;
        Ok(url)
    }

    /// The configured key, unless it is blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose().trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), InitError> {
        if self.model.trim().is_empty() {
            return Err(InitError::EmptyModel);
        }
        match self.base_url.scheme() {
            "http" | "https" => {}
            other => return Err(InitError::UnsupportedScheme(other.to_string())),
        }
        self.generate_content_url()?;
        Ok(())
    }
}

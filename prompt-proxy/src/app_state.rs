use std::sync::Arc;

use crate::{config::Config, dispatcher::Client, types::secret::Secret};

/// Read-only state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState(pub Arc<InnerAppState>);

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.0.config
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.0.client
    }

    /// `None` when no usable credential was configured at startup.
    #[must_use]
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.0.config.upstream.api_key()
    }
}

#[derive(Debug)]
pub struct InnerAppState {
    pub config: Config,
    pub client: Client,
}

pub mod server;
pub mod upstream;
use std::path::PathBuf;

use config::ConfigError;
use displaydoc::Display;
use json_patch::merge;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::init::InitError, types::secret::Secret};

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";
const ENV_PREFIX: &str = "PROMPT_PROXY";

#[derive(Debug, Error, Display)]
pub enum Error {
    /// error collecting config sources: {0}
    Source(#[from] ConfigError),
    /// deserialization error for input config: {0}
    InputConfigDeserialization(#[from] serde_path_to_error::Error<ConfigError>),
    /// deserialization error for merged config: {0}
    MergedConfigDeserialization(
        #[from] serde_path_to_error::Error<serde_json::Error>,
    ),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    pub telemetry: telemetry::Config,
    pub server: self::server::ServerConfig,
    pub upstream: self::upstream::UpstreamConfig,
}

impl Config {
    /// Layers, from lowest to highest precedence: built-in defaults, the
    /// optional config file, `PROMPT_PROXY__*` environment variables, and
    /// finally `GOOGLE_API_KEY`.
    pub fn try_read(
        config_file_path: Option<PathBuf>,
    ) -> Result<Self, Box<Error>> {
        let mut default_config = serde_json::to_value(Self::default())
            .expect("default config is serializable");
        let mut builder = config::Config::builder();
        if let Some(path) = config_file_path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .separator("__")
                .convert_case(config::Case::Kebab),
        );
        let input_config: serde_json::Value = builder
            .build()
            .map_err(Error::from)
            .map_err(Box::new)?
            .try_deserialize()
            .map_err(Error::from)
            .map_err(Box::new)?;
        merge(&mut default_config, &input_config);

        let mut config: Config =
            serde_path_to_error::deserialize(default_config)
                .map_err(Error::from)
                .map_err(Box::new)?;

        // The conventional variable name doesn't follow the prefix +
        // separator format, so it's read separately and wins over the
        // prefixed one.
        if let Some(api_key) = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .and_then(|key| Secret::from(key).non_empty())
        {
            config.upstream.api_key = Some(api_key);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InitError> {
        self.upstream.validate()?;
        if self.upstream.api_key().is_none() {
            tracing::warn!(
                env_var = API_KEY_ENV_VAR,
                "upstream api key is not set, generate requests will fail"
            );
        }
        Ok(())
    }
}

//! Logging setup shared by the workspace binaries.
//!
//! Events are emitted through the `tracing` crate and collected by a
//! `tracing-subscriber` registry. Panics are logged via `log-panics`.
pub mod tracing;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install global subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// Multi-line, human readable output. Useful for local development.
    Pretty,
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// An `EnvFilter` directive, e.g. `info,prompt_proxy=debug`.
    ///
    /// `RUST_LOG` takes precedence when it is set.
    pub level: String,
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::default(),
        }
    }
}

/// Installs the global subscriber. Must be called at most once per process.
pub fn init_telemetry(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        Format::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        Format::Compact => registry.with(fmt::layer().compact()).try_init()?,
        Format::Json => registry
            .with(fmt::layer().json().flatten_event(true))
            .try_init()?,
    }
    log_panics::init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn format_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Format::Pretty).unwrap(),
            r#""pretty""#
        );
        assert_eq!(Config::default().format, Format::Compact);
    }
}

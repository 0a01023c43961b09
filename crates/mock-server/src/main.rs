use std::path::PathBuf;

use clap::Parser;
use mock_server::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Path to a YAML file with the mock's latency and response settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the config's bind address (default `[::]`).
    #[arg(short, long)]
    address: Option<String>,

    /// Overrides the config's port (default 5150).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), mock_server::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("{}=debug", env!("CARGO_CRATE_NAME")).into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut app_state = match args.config {
        Some(path) => AppState::from_file(&path)?,
        None => AppState::default(),
    };
    if let Some(address) = args.address {
        app_state.address = address;
    }
    if let Some(port) = args.port {
        app_state.port = port;
    }
    mock_server::serve(app_state).await
}

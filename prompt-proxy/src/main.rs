use std::path::PathBuf;

use clap::Parser;
use meltdown::Meltdown;
use prompt_proxy::{
    app::App,
    config::Config,
    error::{init::InitError, runtime::RuntimeError},
    utils::meltdown::{TaggedService, wait_for_shutdown_signals},
};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Path to the default config file.
    /// Configs in this file can be overridden by environment variables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), RuntimeError> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let mut config = match Config::try_read(args.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to read config: {error}");
            std::process::exit(1);
        }
    };

    if args.verbose {
        config.telemetry.level = "info,prompt_proxy=trace".to_string();
    }

    telemetry::init_telemetry(&config.telemetry)
        .map_err(InitError::Telemetry)?;
    debug!("telemetry initialized");

    match serde_yml::to_string(&config) {
        Ok(pretty_config) => {
            debug!(config = pretty_config, "creating app with config");
        }
        Err(error) => debug!(%error, "config is not printable"),
    }

    #[cfg(debug_assertions)]
    tracing::warn!("running in debug mode");

    config.validate().inspect_err(|e| {
        tracing::error!(error = %e, "configuration validation failed");
    })?;
    let app = App::new(config)?;

    let tasks = ["shutdown-signals", "gateway"];
    let mut meltdown = Meltdown::new()
        .register(TaggedService::new(
            "shutdown-signals",
            wait_for_shutdown_signals,
        ))
        .register(TaggedService::new("gateway", app));

    info!(tasks = ?tasks, "starting services");

    let mut shutting_down = false;
    while let Some((service, result)) = meltdown.next().await {
        match result {
            Ok(()) => info!(%service, "service stopped successfully"),
            Err(error) => tracing::error!(%service, %error, "service crashed"),
        }

        if !shutting_down {
            info!("propagating shutdown signal...");
            meltdown.trigger();
            shutting_down = true;
        }
    }

    println!("shut down");

    Ok(())
}

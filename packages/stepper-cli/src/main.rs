// Entry point for the API lifecycle stepper CLI

mod cmd;
mod notifier;
mod render;

use anyhow::{Context, Result};
use api_lifecycle::{Config, StepperDeps};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::notifier::ConsoleNotifier;

#[derive(Parser)]
#[command(name = "api-stepper", about = "Show and advance the lifecycle of a publisher API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the Develop / Deploy / Test / Publish progress of an API
    Status {
        api_id: String,
        /// Print the snapshot as JSON instead of the stepper
        #[arg(long)]
        json: bool,
    },
    /// Run a lifecycle transition (Publish by default) if the gate allows it
    Publish {
        api_id: String,
        #[arg(long, default_value = api_lifecycle::PUBLISH_ACTION)]
        action: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,api_lifecycle=info,publisher_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.publisher_base_url, "Configuration loaded");
    let deps = StepperDeps::from_config(&config, Arc::new(ConsoleNotifier))
        .context("Failed to build publisher client")?;

    match cli.command {
        Command::Status { api_id, json } => cmd::status::show_status(deps, &api_id, json).await,
        Command::Publish { api_id, action } => cmd::publish::run_publish(deps, &api_id, &action).await,
    }
}

//! # autopanel — automation table client
//!
//! Composition root that wires the HTTP gateway into the automation panel and
//! runs one CLI command against it.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Install the tracing subscriber (stderr, so tables on stdout stay clean)
//! - Build the reqwest gateway and fetch the initial automation snapshot
//! - Construct the panel, injecting the gateway via port traits
//! - Dispatch the requested command or interactive session
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod commands;
mod config;
mod render;
mod shell;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autopanel_app::ports::AutomationGateway;
use autopanel_app::services::automation_panel::AutomationPanel;
use autopanel_app::services::edit_form::GatewayEditForm;

use crate::cli::{Cli, Command};
use crate::config::Config;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref(), cli.backend_url)
        .context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Gateway
    let gateway = config
        .gateway()
        .build()
        .context("failed to set up the backend client")?;

    // Initial snapshot
    let snapshot = gateway
        .list()
        .await
        .with_context(|| format!("failed to fetch automations from {}", gateway.base_url()))?;
    tracing::debug!(count = snapshot.len(), "loaded automation snapshot");

    // Panel
    let panel = AutomationPanel::new(snapshot, gateway.clone(), GatewayEditForm::new(gateway));

    match cli.command.unwrap_or(Command::List) {
        Command::List => Ok(commands::list(&panel)),
        Command::Delete { ids } => commands::delete(&Arc::new(panel), ids).await,
        Command::Edit(args) => commands::edit(&panel, args).await,
        Command::Shell => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&panel, input, &mut std::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

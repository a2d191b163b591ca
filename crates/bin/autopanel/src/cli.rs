//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage automations on the backend.
#[derive(Debug, Parser)]
#[command(name = "autopanel", version, about)]
pub struct Cli {
    /// Configuration file (defaults to `autopanel.toml` when present).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Backend origin, overriding the configuration file and environment.
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the automation table (default).
    List,
    /// Delete one or more automations.
    ///
    /// Deletes are sent concurrently; a repeated id is only sent once.
    #[command(visible_alias = "rm")]
    Delete {
        /// Automation ids.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Change the name, description or status of an automation.
    Edit(EditArgs),
    /// Open an interactive session on the automation table.
    Shell,
}

#[derive(Debug, clap::Args)]
pub struct EditArgs {
    /// Automation id.
    pub id: String,
    /// New name.
    #[arg(long)]
    pub name: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
    /// New status (e.g. `active`, `paused`).
    #[arg(long)]
    pub status: Option<String>,
}

impl EditArgs {
    /// Whether at least one field was given.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.description.is_some() || self.status.is_some()
    }
}

//! CLI host for the Todoey client core.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todoey_core::{FileSessionStore, Gateway, Navigator, TodoeyClient};
use tracing_subscriber::EnvFilter;

use config::{Config, Overrides};
use transport::UreqTransport;

mod commands;
mod config;
mod transport;

/// Personal to-do list backed by a Todoey server.
#[derive(Parser, Debug)]
#[command(name = "todoey", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the API server.
    #[arg(long)]
    api_url: Option<String>,

    /// Where the session identifier is stored.
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Show your tasks.
    List,

    /// Add a task.
    Add { text: String },

    /// Mark a task done or not done.
    Toggle { id: String },

    /// Delete a task.
    Delete { id: String },

    /// Change a task's text.
    Edit { id: String, text: String },
}

fn main() -> Result<()> {
    let Cli {
        config,
        api_url,
        session_file,
        cmd,
    } = Cli::parse();

    install_tracing();

    let overrides = Overrides::from_env().merge(Overrides {
        api_url,
        session_file,
    });
    let config = Config::load(config.as_deref(), overrides)?;
    tracing::debug!(api_url = %config.api_url, session = %config.session_file.display(), "configured");

    let gateway = Gateway::new(TodoeyClient::new(&config.api_url), UreqTransport::new());
    let mut nav = Navigator::new(gateway, FileSessionStore::new(config.session_file));
    commands::run(cmd, &mut nav, &mut std::io::stdout().lock())
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

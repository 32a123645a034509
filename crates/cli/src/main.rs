//! mongoidx CLI - declarative MongoDB index management
//!
//! Drives the index lifecycle against the store named in configuration.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mongoidx::ProviderConfig;
use mongoidx_provider::{IndexResource, ResourceState};
use mongoidx_storage::create_index_store;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "mongoidx")]
#[command(about = "Declarative MongoDB index management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the index declared in a spec file
    Create {
        /// Index spec (.toml or .json)
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,
    },
    /// Read an index by id (<database>.<collection>.<index_name>)
    Read { id: String },
    /// Import an existing index by id
    Import { id: String },
    /// Create or replace the index so it matches a spec file
    Apply {
        /// Index spec (.toml or .json)
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,
    },
    /// Drop an index by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let resource = connect(cli.config.as_deref()).await?;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Commands::Create { spec } => {
            let spec = mongoidx::load_spec(&spec)?;
            print_state(&mongoidx::create(&resource, spec, &cancel).await?)
        }
        Commands::Read { id } => print_state(&mongoidx::read(&resource, &id, &cancel).await?),
        Commands::Import { id } => print_state(&mongoidx::import(&resource, &id, &cancel).await?),
        Commands::Apply { spec } => {
            let spec = mongoidx::load_spec(&spec)?;
            let (action, state) = mongoidx::apply(&resource, spec, &cancel).await?;
            debug!(action = ?action, "Apply finished");
            print_state(&state)
        }
        Commands::Delete { id } => mongoidx::delete(&resource, &id, &cancel).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "mongoidx={level},mongoidx_provider={level},mongoidx_storage={level}"
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn connect(config_path: Option<&Path>) -> Result<IndexResource> {
    let config = ProviderConfig::load(config_path)?;
    config.validate()?;
    debug!(storage = ?config.storage, "Loaded configuration");

    let store = create_index_store(config.storage)
        .await
        .context("Failed to create index store")?;
    Ok(IndexResource::new(store))
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight operation");
            token.cancel();
        }
    });
    cancel
}

fn print_state(state: &ResourceState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("Failed to render state")?;
    println!("{json}");
    Ok(())
}

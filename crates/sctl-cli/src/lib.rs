//! sctl command-line interface.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sctl_secrets::{RecordStore, SecretService};

/// Manage secrets encrypted by an external KMS
#[derive(Parser)]
#[command(name = "sctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the store document (default: .scuttle.json in the working directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a value and store it under NAME
    Add(commands::add::AddArgs),

    /// Remove a secret (case-insensitive, silent if absent)
    Rm(commands::rm::RmArgs),

    /// List known secret names, sorted
    List,

    /// Run a command with decrypted secrets exported as environment variables
    Run(commands::run::RunArgs),
}

/// Run the CLI with the given arguments. Returns the process exit code
/// (non-zero only when forwarding a child's exit status from `run`).
pub async fn run(cli: Cli) -> anyhow::Result<i32> {
    let store = match cli.store {
        Some(path) => RecordStore::new(path),
        None => RecordStore::from_default_path(),
    };
    let service = SecretService::new(store);

    match cli.command {
        Commands::Add(args) => {
            commands::add::run(&service, args).await?;
            Ok(0)
        }
        Commands::Rm(args) => {
            commands::rm::run(&service, args).await?;
            Ok(0)
        }
        Commands::List => {
            commands::list::run(&service).await?;
            Ok(0)
        }
        Commands::Run(args) => commands::run::run(&service, args).await,
    }
}

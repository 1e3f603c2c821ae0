//! boxhaul CLI - Dropbox folder mirroring and sidecar cleanup
//!
//! Provides commands for:
//! - Mirroring a Dropbox folder to local disk (optionally restoring
//!   deleted files from their latest revision)
//! - Sweeping sidecar files (`.lrv`/`.thm`) out of a directory tree
//! - Checking and revoking the Dropbox access token

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use boxhaul_core::config::Config;
use commands::{auth::AuthCommand, mirror::MirrorCommand, sweep::SweepCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "boxhaul", version, about = "Dropbox folder mirror and sidecar sweep")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mirror a Dropbox folder to a local directory
    Mirror(MirrorCommand),
    /// Delete sidecar files from a directory tree
    Sweep(SweepCommand),
    /// Token management commands
    #[command(subcommand)]
    Auth(AuthCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Mirror(cmd) => cmd.execute(format, &config).await,
        Commands::Sweep(cmd) => cmd.execute(format, &config).await,
        Commands::Auth(cmd) => cmd.execute(format).await,
    }
}

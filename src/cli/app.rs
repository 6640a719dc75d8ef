//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::config::{CodecKind, Config};
use super::output::{Output, OutputFormat};
use super::record;
use crate::storage::{JsonCodec, YamlCodec};

#[derive(Parser)]
#[command(name = "jsondb")]
#[command(author, version, about = "A tiny file-backed document store")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database directory
    #[arg(long, short = 'r', global = true, env = "JSONDB_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "JSONDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Record format on disk
    #[arg(long, global = true)]
    pub codec: Option<CodecKind>,

    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database directory (reuses an existing one)
    Init,

    /// Write a record
    ///
    /// Examples:
    ///   jsondb write fish red '{"type": "red"}'
    ///   echo '{"type": "blue"}' | jsondb write fish blue
    Write {
        /// Collection name
        collection: String,

        /// Resource name
        resource: String,

        /// Record value as JSON (read from stdin when omitted)
        value: Option<String>,
    },

    /// Print a record
    Read {
        /// Collection name
        collection: String,

        /// Resource name
        resource: String,
    },

    /// Print every record in a collection
    ReadAll {
        /// Collection name
        collection: String,
    },

    /// List resource names in a collection
    List {
        /// Collection name
        collection: String,
    },

    /// Delete a record, or a whole collection when no resource is given
    Delete {
        /// Collection name
        collection: String,

        /// Resource name (omit to delete the collection)
        #[arg(default_value = "")]
        resource: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let output = Output::new(cli.format.unwrap_or(config.output), cli.verbose);
    let root = cli.root.clone().unwrap_or_else(|| config.root_or_default());
    let codec = cli.codec.unwrap_or(config.codec);

    output.verbose_ctx(
        "open",
        &format!("Database at {} ({:?} records)", root.display(), codec),
    );

    match codec {
        CodecKind::Json => record::run(cli.command, &root, JsonCodec, &output)?,
        CodecKind::Yaml => record::run(cli.command, &root, YamlCodec, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "jsondb=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

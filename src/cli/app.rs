//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{inspect, order};
use crate::domain::{EligibleQueue, Strategy};
use crate::storage::{Config, PROJECT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "ordo")]
#[command(author, version, about = "Dependency-aware task ordering")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default lookup
    #[arg(long, global = true, env = "ORDO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the recommended execution order for a request
    ///
    /// Examples:
    ///   ordo order tasks.json
    ///   ordo order tasks.yaml --strategy deps-only
    ///   cat tasks.json | ordo order -
    Order {
        /// Request file (JSON, YAML or JSONL); reads stdin when omitted or `-`
        file: Option<PathBuf>,

        /// Tie-break strategy: deps-due-sjf, deps-due-fifo or deps-only (overrides
        /// the request and the config)
        #[arg(long, short)]
        strategy: Option<Strategy>,

        /// Eligible-set implementation: resort or heap
        #[arg(long)]
        queue: Option<EligibleQueue>,
    },

    /// Validate a request and check it for dependency cycles
    Check {
        /// Request file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },

    /// Show the dependency graph of a request
    Graph {
        /// Request file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },

    /// List the tie-break strategies
    Strategies,

    /// Write a default config file
    Init {
        /// Directory to write `.ordo.toml` into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    debug!(source = ?config.source, "configuration loaded");

    let output = Output::new(cli.format.unwrap_or(config.default_format.into()));

    match cli.command {
        Commands::Order {
            file,
            strategy,
            queue,
        } => order::order(&output, &config, file.as_deref(), strategy, queue)?,
        Commands::Check { file } => order::check(&output, &config, file.as_deref())?,
        Commands::Graph { file } => inspect::graph(&output, &config, file.as_deref())?,
        Commands::Strategies => inspect::strategies(&output, &config)?,
        Commands::Init { path, force } => init(&output, &path, force)?,
    }

    debug!("command completed");
    Ok(())
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides `--verbose`
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Writes a default `.ordo.toml`
fn init(output: &Output, dir: &std::path::Path, force: bool) -> Result<()> {
    let path = dir.join(PROJECT_CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::create_dir_all(dir)?;
    Config::default().save(&path)?;
    debug!(path = %path.display(), "wrote default config");

    output.success(&format!("Wrote config to {}", path.display()));
    Ok(())
}

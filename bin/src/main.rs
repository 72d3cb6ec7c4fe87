//! orecheck CLI - Finds out which plugins are published on the Ore repository.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use orecheck_lib::prelude::*;
use orecheck_lib::url::API_BASE;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "orecheck")]
#[command(about = "Discover which plugins are published on the Ore repository", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Options shared by every command that talks to the repository.
#[derive(Args)]
struct ProbeArgs {
    /// Base URL of the Ore repository API
    #[arg(long, default_value = API_BASE)]
    api_base: String,

    /// Connect and read timeout per request, in milliseconds
    #[arg(long, default_value = "250")]
    timeout_ms: u64,

    /// Allow plain-HTTP API endpoints
    #[arg(long)]
    allow_http: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

impl ProbeArgs {
    fn probe_config(&self) -> ProbeConfig {
        let timeout = Duration::from_millis(self.timeout_ms);
        ProbeConfig {
            api_base: self.api_base.clone(),
            connect_timeout: timeout,
            read_timeout: timeout,
            https_only: !self.allow_http,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether individual plugin ids exist on Ore
    Check {
        /// Plugin ids (e.g., nucleus, luckperms)
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        probe: ProbeArgs,
    },

    /// Run a scheduled availability scan over a candidate manifest
    Scan {
        /// JSON manifest listing the installed plugins
        manifest: PathBuf,

        /// Seconds to wait before the scan starts
        #[arg(long, default_value = "5")]
        delay: u64,

        /// Maximum concurrent requests
        #[arg(long, default_value_t = ScanConfig::DEFAULT_CONCURRENCY)]
        concurrency: usize,

        #[command(flatten)]
        probe: ProbeArgs,
    },
}

/// Installs the log subscriber. `RUST_LOG` overrides the `-v` count.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Check { ids, probe } => {
            commands::check::check_ids(&ids, probe.probe_config(), probe.format).await
        }
        Commands::Scan {
            manifest,
            delay,
            concurrency,
            probe,
        } => {
            commands::scan::scan(
                &manifest,
                probe.probe_config(),
                ScanConfig { concurrency },
                Duration::from_secs(delay),
                probe.format,
                cli.quiet,
            )
            .await
        }
    }
}

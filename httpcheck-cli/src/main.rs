// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! httpcheck - periodic HTTP reachability and latency checks.
//!
//! # Examples
//!
//! ```bash
//! # Check every url in urls.txt every 30 seconds, 10 at a time
//! httpcheck --urls urls.txt
//!
//! # Every 5 seconds, 50 at a time, fresh connection per request
//! httpcheck -u urls.txt --delay 5s -n 50 --nokeepalive
//!
//! # JSON lines for a log shipper
//! httpcheck -u urls.txt --format json
//! ```

mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use httpcheck_core::{DEFAULT_CONCURRENCY, TargetSet, parse_duration};
use httpcheck_probe::{Engine, HttpTransport, StopSignal};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use output::StdoutSink;

// ============================================================================
// CLI Definition
// ============================================================================

/// httpcheck - periodic HTTP reachability and latency checks.
#[derive(Parser)]
#[command(name = "httpcheck")]
#[command(about = "Periodically HEAD-probe a list of urls and report status and latency")]
#[command(long_about = r#"
httpcheck sends a HEAD request to every url in a list, with a bounded
number of requests in flight, waits for all of them, sleeps, and repeats
until killed.

Each result is one line on stdout:
  <url>\t<duration>\t<status>
  ERROR:\t<url>\t<error>

Url list format: one url per line; blank lines and lines starting
with '#' are ignored.
"#)]
#[command(version)]
pub struct Cli {
    /// File with urls, one url per line.
    #[arg(long, short = 'u', value_name = "FILE")]
    pub urls: PathBuf,

    /// Delay between each check cycle (e.g. 30s, 1m30s, 500ms).
    #[arg(long, default_value = config::DEFAULT_DELAY, value_parser = parse_duration)]
    pub delay: Duration,

    /// Number of concurrent checks to make.
    #[arg(short = 'n', long = "concurrency", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Disable keep alive.
    #[arg(long = "nokeepalive")]
    pub no_keep_alive: bool,

    /// Per-request timeout.
    #[arg(long, default_value = config::DEFAULT_TIMEOUT, value_parser = parse_duration)]
    pub timeout: Duration,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Prefix text lines with the local time.
    #[arg(long)]
    pub timestamps: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no diagnostics on stderr).
    #[arg(long, short)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Tab-separated lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// The engine failed to start.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("httpcheck=debug,info")
    } else {
        EnvFilter::new("httpcheck=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}

/// Validates configuration, loads targets, and runs the engine. Returns
/// only on a startup failure: once started, the engine runs until the
/// process is killed.
async fn run(cli: &Cli) -> Result<()> {
    let config = cli.engine_config()?;
    let settings = cli.transport_settings(&config)?;
    let targets = TargetSet::load(&cli.urls)?;

    let transport = HttpTransport::new(&settings)?;
    let sink = StdoutSink::new(cli.format, cli.timestamps);
    let engine = Engine::new(targets, config, Arc::new(transport), Arc::new(sink))?;

    engine.run(StopSignal::never()).await;
    Ok(())
}

//! uplink: check liveness and latency of HTTP(S) endpoints.
//!
//! # Usage
//!
//! ```text
//! uplink urls.txt --verbose --timeout 2000 --retries 1 --json results.json
//! uplink urls.txt --watch
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use uplink_core::config::DEFAULT_WATCH_INTERVAL;
use uplink_core::{CheckConfig, RunResult, UplinkConfig, load_endpoints};
use uplink_health::Checker;
use uplink_health::export::write_json;

mod report;

use report::ConsoleReporter;

#[derive(Parser, Debug)]
#[command(
    name = "uplink",
    about = "Check liveness and latency of HTTP(S) endpoints",
    version
)]
struct Cli {
    /// File with one endpoint URL per line
    file: PathBuf,

    /// Show status or error and latency for each endpoint
    #[arg(short, long)]
    verbose: bool,

    /// Write all outcomes as JSON to this path after each run
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Per-attempt timeout in milliseconds [default: 5000]
    #[arg(short, long, value_name = "MS")]
    timeout: Option<u64>,

    /// Retries per endpoint after a failed attempt [default: 0]
    #[arg(short, long, value_name = "N")]
    retries: Option<u32>,

    /// Maximum endpoints checked at once [default: 10]
    #[arg(short, long, value_name = "N")]
    concurrency: Option<usize>,

    /// Repeat the check on a fixed period until interrupted
    #[arg(short, long)]
    watch: bool,

    /// Watch period in milliseconds [default: 60000]
    #[arg(long, value_name = "MS", requires = "watch")]
    interval: Option<u64>,

    /// Config file with a [check] table
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Merge defaults, the config file, and command-line flags, in that order.
fn resolve_config(cli: &Cli) -> anyhow::Result<CheckConfig> {
    let mut config = match &cli.config {
        Some(path) => UplinkConfig::from_file(path)?.to_check_config()?,
        None => CheckConfig::default(),
    };

    if let Some(ms) = cli.timeout {
        config.timeout = Duration::from_millis(ms);
    }
    if let Some(retries) = cli.retries {
        config.max_retries = retries;
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }

    config.watch_interval = if cli.watch {
        let interval = cli.interval.map(Duration::from_millis);
        Some(interval.or(config.watch_interval).unwrap_or(DEFAULT_WATCH_INTERVAL))
    } else {
        None
    };

    config.validate()?;
    Ok(config)
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let endpoints = load_endpoints(&cli.file)?;
    info!(endpoints = endpoints.len(), file = %cli.file.display(), "endpoints loaded");

    let checker = Checker::http(config.clone())?;
    let reporter = ConsoleReporter::new(use_color(cli.no_color), cli.verbose);

    let Some(interval) = config.watch_interval else {
        let result = checker.run(&endpoints).await;
        println!("{}", reporter.render(&result));
        if let Some(path) = &cli.json {
            write_json(path, &result)?;
        }
        return Ok(());
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let file = cli.file.clone();
    let mut preloaded = Some(endpoints);
    let load = || match preloaded.take() {
        Some(endpoints) => Ok(endpoints),
        None => load_endpoints(&file),
    };
    let on_result = |result: RunResult| {
        println!("{}\n", reporter.render(&result));
        if let Some(path) = &cli.json {
            if let Err(e) = write_json(path, &result) {
                error!(error = %e, "export failed");
            }
        }
    };

    uplink_health::watch(&checker, interval, load, on_result, shutdown_rx).await?;
    Ok(())
}

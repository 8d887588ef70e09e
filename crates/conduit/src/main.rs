//! Conduit - Collector pipeline composer
//!
//! # Usage
//!
//! ```bash
//! # Compose a collector config from configs/conduit.toml
//! conduit compose
//! conduit compose --config conduit.toml --base base.yaml --output collector.yaml
//!
//! # List the destination types this build knows about
//! conduit destinations
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use conduit_config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Conduit - Collector pipeline composer
#[derive(Parser, Debug)]
#[command(name = "conduit")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a collector configuration from the configured destinations
    Compose(cmd::compose::ComposeArgs),

    /// List registered destination types
    Destinations(cmd::destinations::DestinationsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compose(args) => {
            let config = cmd::compose::load_config(args.config.as_deref())?;
            let level = resolve_log_level(cli.log_level.as_deref(), &config.log);
            init_logging(&level, config.log.format)?;
            cmd::compose::run(args, config)
        }
        Command::Destinations(args) => {
            // Listing doesn't need logging - just outputs to stdout
            cmd::destinations::run(args)
        }
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config: &LogConfig) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => config.level.as_str().to_string(),
    }
}

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so composed YAML on stdout stays clean.
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Console => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init(),
    }

    Ok(())
}

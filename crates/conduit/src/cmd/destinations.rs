//! Destinations command - List registered destination types

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use conduit_destinations::ConfigurerRegistry;

/// Destinations command arguments
#[derive(Args, Debug)]
pub struct DestinationsArgs {
    /// Print only the type tags, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the destinations command
pub fn run(args: DestinationsArgs) -> Result<()> {
    let registry = ConfigurerRegistry::builtin().context("failed to build destination registry")?;
    let listing = render(&registry, args.quiet);

    io::stdout()
        .write_all(listing.as_bytes())
        .context("failed to write to stdout")
}

fn render(registry: &ConfigurerRegistry, quiet: bool) -> String {
    let mut out = String::new();

    if quiet {
        for dest_type in registry.destination_types() {
            out.push_str(dest_type.as_str());
            out.push('\n');
        }
        return out;
    }

    out.push_str(&format!("{:<12} {:<14} {}\n", "TYPE", "NAME", "SIGNALS"));
    for configurer in registry.iter() {
        out.push_str(&format!(
            "{:<12} {:<14} {}\n",
            configurer.destination_type().as_str(),
            configurer.display_name(),
            configurer.supported_signals()
        ));
    }
    out
}

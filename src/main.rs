//! cachebust - content-hash cache busting for static sites.

mod bust;
mod cli;
mod config;
mod logger;
mod markup;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::BustConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = BustConfig::from_cli(&cli)?;
    logger::set_verbose(config.verbose);

    let changes = bust::bust_site(&config.root)
        .with_context(|| format!("failed to scan `{}`", config.root.display()))?;

    changes.print();
    log!("done"; "{}", changes);
    Ok(())
}

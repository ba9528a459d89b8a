//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Rename js/css assets with a content hash and rewrite the html that references them
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Directory to scan recursively for html files
    #[arg(short, long, default_value = "./", value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

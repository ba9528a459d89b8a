//! Run configuration resolved from CLI arguments.
//!
//! The only setting that affects behavior is the root directory to scan.

mod error;

pub use error::ConfigError;

use std::path::PathBuf;

use crate::cli::Cli;

/// Configuration for one cache-busting run.
#[derive(Debug, Clone)]
pub struct BustConfig {
    /// Directory scanned recursively for markup files.
    pub root: PathBuf,
    /// Print skipped references and unchanged assets.
    pub verbose: bool,
}

impl BustConfig {
    /// Build and validate a config from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config = Self {
            root: cli.dir.clone(),
            verbose: cli.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    /// The root must be an existing directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.exists() {
            return Err(ConfigError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ConfigError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }
}

//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("root directory `{}` does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("root `{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::RootNotFound(PathBuf::from("public"));
        let display = format!("{err}");
        assert!(display.contains("does not exist"));
        assert!(display.contains("public"));

        let err = ConfigError::NotADirectory(PathBuf::from("index.html"));
        assert!(format!("{err}").contains("not a directory"));
    }
}

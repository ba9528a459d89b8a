//! Per-item errors recorded against a markup file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A recoverable failure while busting one reference.
///
/// None of these abort the run; they end up in the [`ChangeLog`](super::ChangeLog).
#[derive(Debug, Error)]
pub enum BustError {
    #[error("cannot read asset `{}`: {source}", .path.display())]
    AssetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot rename `{}` to `{}`: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read markup `{}`: {source}", .path.display())]
    MarkupRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write markup `{}`: {source}", .path.display())]
    MarkupWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_bust_error_display() {
        let err = BustError::Rename {
            from: PathBuf::from("site/cool.js"),
            to: PathBuf::from("site/cool-cc1.js"),
            source: io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        let display = err.to_string();
        assert!(display.contains("site/cool.js"));
        assert!(display.contains("site/cool-cc1.js"));
        assert!(display.contains("denied"));
    }
}

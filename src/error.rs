use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures. Any of these aborts the run before a report is printed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to resolve symlink {path}: {source}")]
    Symlink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walker stopped unexpectedly: {0}")]
    WalkerPanicked(#[from] tokio::task::JoinError),

    #[error("invalid pattern for license `{label}`: {source}")]
    Pattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("license label `{0}` is reserved")]
    ReservedLabel(String),
}

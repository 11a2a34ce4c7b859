//! Error types for rule configuration loading.

use std::path::PathBuf;

/// Errors that can occur while loading a rule configuration document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem I/O error.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML/JSON parse or deserialization error.
    #[error("Rule config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

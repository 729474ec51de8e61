//! Error types for packvars-sdk

use std::path::PathBuf;

/// Result type for packvars-sdk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading pack definitions
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to parse a pack manifest.
    #[error("failed to parse pack manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Pack manifest file not found at the expected path.
    #[error("pack manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Invalid pack name or alias.
    #[error("invalid pack name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Two dependencies of the same pack resolve to the same key.
    #[error("pack '{pack}' declares more than one dependency named '{key}'")]
    DuplicateDependency { pack: String, key: String },

    /// I/O error reading pack files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

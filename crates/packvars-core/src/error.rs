//! Error types for packvars-core

use std::fmt;

/// Result type for packvars-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Layout a variable set was loaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableShape {
    /// Flat string-keyed layout of the older template convention.
    Legacy,
    /// Typed-id layout of the current convention.
    Unified,
}

impl fmt::Display for VariableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableShape::Legacy => write!(f, "legacy"),
            VariableShape::Unified => write!(f, "unified"),
        }
    }
}

/// Terminal errors from packvars-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store already holds a variable set.
    #[error("variables already loaded ({shape})")]
    AlreadyLoaded { shape: VariableShape },

    /// An override file is not valid.
    #[error("failed to parse override file {filename}: {message}")]
    OverrideParse { filename: String, message: String },

    /// A legacy JSON variables file is not valid.
    #[error("failed to parse legacy variables {filename}: {source}")]
    LegacyParse {
        filename: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a single value could not be turned into a generic value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("value is not known")]
    Unknown,

    #[error("number {0} has no generic representation")]
    NonFiniteNumber(f64),

    /// A nested element failed; `path` locates it, e.g. `.hosts[2]`.
    #[error("at {path}: {source}")]
    Nested {
        path: String,
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    /// Prefix the error location with one more path segment.
    pub(crate) fn within(self, segment: String) -> Self {
        match self {
            ConversionError::Nested { path, source } => ConversionError::Nested {
                path: format!("{}{}", segment, path),
                source,
            },
            other => ConversionError::Nested {
                path: segment,
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_loaded_display() {
        let err = Error::AlreadyLoaded {
            shape: VariableShape::Legacy,
        };
        assert_eq!(err.to_string(), "variables already loaded (legacy)");
    }

    #[test]
    fn test_within_accumulates_path() {
        let err = ConversionError::Unknown
            .within("[2]".to_string())
            .within(".hosts".to_string());
        assert_eq!(err.to_string(), "at .hosts[2]: value is not known");
    }
}

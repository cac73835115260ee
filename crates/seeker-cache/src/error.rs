//! Error types for seeker-cache

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in lookup cache operations
///
/// A missing store is not an error; it reads as an empty cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The persisted store exists but could not be read or written
    #[error("I/O error on lookup cache {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted store is not a flat resource-to-peer mapping
    #[error("corrupt lookup cache {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

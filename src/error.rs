//! Loader error types
//!
//! Every fallible operation in the library returns [`LoaderError`]. Only
//! pattern problems reach the caller of a transformation; resolution
//! failures are turned into development diagnostics on the way. Config
//! files are loaded with `anyhow` at the tool edge.

use std::path::PathBuf;
use thiserror::Error;

/// Loader errors
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Cannot resolve '{request}' from {context:?}")]
    NotFound { request: String, context: PathBuf },

    #[error("Invalid package manifest {path:?}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl LoaderError {
    /// Shorthand for a failed name-to-path resolution
    pub fn not_found(request: impl Into<String>, context: impl Into<PathBuf>) -> Self {
        LoaderError::NotFound {
            request: request.into(),
            context: context.into(),
        }
    }
}

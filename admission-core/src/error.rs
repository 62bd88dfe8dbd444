/// Structured error types for the admission-core library.
///
/// Uses `thiserror` for better API surface and error composition.
/// The database crate defines its own error type on top of these;
/// library consumers get structured, composable errors throughout.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for admission-core operations
#[derive(Error, Debug)]
pub enum AdmissionError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration file missing
    #[error("Config not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration content invalid
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for admission-core operations
pub type Result<T> = std::result::Result<T, AdmissionError>;

impl AdmissionError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

//! Error handling for the dataedit-rs core
//!
//! This module defines the crate error type and a Result alias used
//! throughout the editing and processing layers.

use thiserror::Error;

/// Detail string used when the remote engine's failure reason is unknown
/// (unexpected status code, undecodable body, transport failure).
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

/// Main error type for dataedit-rs operations
#[derive(Error, Debug)]
pub enum DataEditError {
    /// Errors reported by the remote processing engine.
    ///
    /// `detail` carries the server's own message for 400 responses and
    /// [`UNKNOWN_ERROR_DETAIL`] for everything else. `status` is 0 when no
    /// response was received at all.
    #[error("Processing engine error ({status}): {detail}")]
    Remote { status: u16, detail: String },

    /// A pipeline step's JSON override string failed to parse
    #[error("Malformed step override at task {task}, step {step}: {message}")]
    StepOverride {
        task: usize,
        step: usize,
        message: String,
    },

    /// A descriptor import could not be decoded as JSON or YAML
    #[error("Descriptor import error: {0}")]
    ImportDecode(String),

    /// Errors encoding a descriptor for export
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors (file payload reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DataEditError>,
    },
}

impl DataEditError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DataEditError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a remote error with the fixed unknown-failure detail
    pub fn remote_unknown(status: u16) -> Self {
        DataEditError::Remote {
            status,
            detail: UNKNOWN_ERROR_DETAIL.to_string(),
        }
    }
}

/// Result type alias for dataedit-rs operations
pub type Result<T> = std::result::Result<T, DataEditError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

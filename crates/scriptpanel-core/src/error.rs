//! Error handling for Script Panel
//!
//! Errors raised by the palette model and by host bindings. Settings and
//! layout persistence have their own error type in `scriptpanel-settings`.

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// A palette item was created without wrapped content
    #[error("Palette item '{id}' has no wrapped content")]
    MissingWrappedContent {
        /// The id requested for the item.
        id: String,
    },

    /// An argument was outside the accepted domain
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The argument name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A script path does not exist on disk
    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    /// The host binding does not implement an operation
    #[error("Host '{host}' does not support {operation}")]
    Unsupported {
        /// The host name.
        host: String,
        /// The operation that was requested.
        operation: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(host: impl Into<String>, operation: impl Into<String>) -> Self {
        Error::Unsupported {
            host: host.into(),
            operation: operation.into(),
        }
    }

    /// Check if this error means the host lacks the requested operation
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}

/// Result type for Script Panel operations
pub type Result<T> = std::result::Result<T, Error>;

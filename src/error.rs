//! Error types for the color flipper.

use thiserror::Error;

/// Errors that can occur while converting colors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input is not a `#RRGGBB` / `RRGGBB` hex string
    #[error("Invalid hex color '{input}': {reason}")]
    InvalidFormat {
        /// The rejected input, as given
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },
}

impl ColorError {
    pub(crate) fn invalid_format(input: &str, reason: &'static str) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason,
        }
    }
}

/// Errors from writing to the system clipboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is reachable from this front-end
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The write was attempted and rejected
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Errors while wiring a front-end to its environment.
#[derive(Error, Debug)]
pub enum FrontendError {
    /// A required DOM element does not exist
    #[error("Missing element #{0}")]
    MissingElement(&'static str),

    /// Browser globals (window, document) are not available
    #[error("Browser environment unavailable: {0}")]
    Environment(String),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

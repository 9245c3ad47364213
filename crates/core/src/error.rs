//! Error types for the reader pipeline.
//!
//! Every stage of the pipeline reports failures through [`QuteReaderError`].
//! The `Display` text of an error is what the browser shows in its
//! `message-error` bar, so messages are written for the person reading them.
//!
//! # Example
//!
//! ```rust
//! use qute_reader_core::{QuteReaderError, Result};
//!
//! fn require_url(url: Option<&str>) -> Result<&str> {
//!     url.ok_or(QuteReaderError::MissingVar("QUTE_URL"))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reader view operations.
#[derive(Error, Debug)]
pub enum QuteReaderError {
    /// A required `QUTE_*` variable is not set.
    ///
    /// Usually means the binary was started outside qutebrowser without the
    /// matching command-line flags.
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The readability extractor rejected the document.
    #[error("Readability extraction failed: {0}")]
    Extraction(String),

    /// The extractor ran but produced no article body.
    #[error("No readable content found on the page")]
    NoContent,

    /// A command could not be handed to the browser.
    #[error("Could not send command to browser: {0}")]
    HostError(String),
}

/// Result type alias for QuteReaderError.
pub type Result<T> = std::result::Result<T, QuteReaderError>;

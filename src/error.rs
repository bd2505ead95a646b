//! Centralized error handling for hashify.
//!
//! Every fallible library operation returns [`Result<T>`], whose error type is
//! [`HashifyError`]. Errors are grouped by where they come from so the
//! pipeline boundary can turn them into a single user-facing message:
//!
//! ```
//! use hashify::error::HashifyError;
//!
//! fn describe(err: &HashifyError) -> &'static str {
//!     match err {
//!         HashifyError::Io(_) => "could not read or write a file",
//!         HashifyError::MalformedInput(_) => "the input table could not be parsed",
//!         HashifyError::Config(_) => "the configuration is invalid",
//!         _ => "something else went wrong",
//!     }
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` / `.with_context()` to any `Result` whose
//! error converts into [`HashifyError`]:
//!
//! ```no_run
//! use hashify::error::{Result, ResultExt as _};
//!
//! fn load(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//! ```

use std::fmt;

/// Main error type for hashify operations.
#[derive(Debug)]
pub enum HashifyError {
    /// I/O errors (opening the input, writing artifacts, etc.)
    Io(std::io::Error),

    /// The tabular input could not be parsed (bad CSV, bad encoding, ragged rows)
    MalformedInput(String),

    /// Table construction errors (mismatched column lengths, duplicate headers)
    Table(String),

    /// Configuration errors
    Config(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for HashifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedInput(msg) => write!(f, "Malformed input: {msg}"),
            Self::Table(msg) => write!(f, "Table error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for HashifyError {}

impl From<std::io::Error> for HashifyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HashifyError {
    fn from(err: csv::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<serde_json::Error> for HashifyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

/// Result type alias for hashify operations.
pub type Result<T> = std::result::Result<T, HashifyError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<HashifyError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: HashifyError = e.into();
            HashifyError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: HashifyError = e.into();
            HashifyError::Other(format!("{}: {}", f(), err))
        })
    }
}

//! Centralized error handling for the bikeshare explorer.
//!
//! Library operations return [`Result`], whose error is the [`BikeshareError`]
//! enum. The variants map onto the ways a session can go wrong:
//!
//! ```
//! use bikeshare::error::BikeshareError;
//!
//! fn describe(err: &BikeshareError) -> &'static str {
//!     match err {
//!         BikeshareError::DataUnavailable(_) => "pick another city",
//!         BikeshareError::Aborted => "input closed",
//!         _ => "unexpected failure",
//!     }
//! }
//! ```
//!
//! ## Conversions
//!
//! `From` is implemented for the error types the crate touches (I/O, polars,
//! JSON) so `?` works across module boundaries. The [`ResultExt`] trait adds
//! `.context()` for attaching a short description:
//!
//! ```no_run
//! use bikeshare::error::ResultExt as _;
//!
//! fn read_notes() -> bikeshare::error::Result<String> {
//!     std::fs::read_to_string("notes.txt").context("Failed to read notes")
//! }
//! ```

use std::fmt;

/// Main error type for bikeshare operations.
#[derive(Debug)]
pub enum BikeshareError {
    /// I/O errors (console reads and writes, config files)
    Io(std::io::Error),

    /// A city dataset is missing, unreadable or lacks required columns
    DataUnavailable(String),

    /// Aggregation over a loaded dataset failed
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Input stream closed while a prompt was waiting
    Aborted,

    /// Generic error with context
    Other(String),
}

impl fmt::Display for BikeshareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataUnavailable(msg) => write!(f, "Data unavailable: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Aborted => write!(f, "Input closed by user"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BikeshareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BikeshareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for BikeshareError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for BikeshareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for BikeshareError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for bikeshare operations.
pub type Result<T> = std::result::Result<T, BikeshareError>;

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
    E: Into<BikeshareError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e.into(), msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

// Keeps the variant for data and config failures so callers can still match on them.
fn wrap(err: BikeshareError, msg: String) -> BikeshareError {
    match err {
        BikeshareError::DataUnavailable(inner) => {
            BikeshareError::DataUnavailable(format!("{msg}: {inner}"))
        }
        BikeshareError::DataProcessing(inner) => {
            BikeshareError::DataProcessing(format!("{msg}: {inner}"))
        }
        BikeshareError::Config(inner) => BikeshareError::Config(format!("{msg}: {inner}")),
        BikeshareError::Aborted => BikeshareError::Aborted,
        other => BikeshareError::Other(format!("{msg}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BikeshareError::DataUnavailable("chicago.csv not found".to_owned());
        assert_eq!(err.to_string(), "Data unavailable: chicago.csv not found");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.txt",
        ));

        let result: Result<()> = result.context("Failed to read file");
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Failed to read file"), "got: {msg}");
        assert!(msg.contains("file.txt"), "got: {msg}");
    }

    #[test]
    fn test_context_keeps_data_variant() {
        let result: Result<()> = Err(BikeshareError::DataUnavailable("no rows".to_owned()));
        let err = result.with_context(|| "Loading washington".to_owned()).unwrap_err();
        assert!(
            matches!(err, BikeshareError::DataUnavailable(ref m) if m == "Loading washington: no rows"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_context_keeps_abort() {
        let result: Result<()> = Err(BikeshareError::Aborted);
        assert!(matches!(
            result.context("Prompting for city"),
            Err(BikeshareError::Aborted)
        ));
    }
}

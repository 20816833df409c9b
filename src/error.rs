//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! "Not enough data" is not an error: views that cannot be computed return
//! [`Outcome::InsufficientData`](crate::analysis::Outcome::InsufficientData).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A single line of the export could not be parsed.
    ///
    /// The parser never returns this for the whole file: malformed lines are
    /// collected in the [`ParseReport`](crate::parser::ParseReport) and skipped.
    #[error("Failed to parse {format} line {line}: {source}")]
    Parse {
        /// The format being parsed (e.g. "WhatsApp TXT")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// 1-based line number in the export
        line: usize,
    },

    /// The file format doesn't match the expected structure.
    ///
    /// This occurs when no line of a non-empty export matches any known
    /// WhatsApp line prefix.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The analysis configuration cannot be used.
    ///
    /// Raised once, when a session is created, never per request.
    #[error("Configuration error: {message}{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Config {
        /// Description of what's wrong
        message: String,
        /// The offending file, if any
        path: Option<PathBuf>,
    },

    /// The requested user does not appear in the export.
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    /// UTF-8 encoding error.
    ///
    /// Occurs when the uploaded export is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of line-level parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The date/time prefix matched but could not be turned into a timestamp.
    #[error("unrecognized date '{0}'")]
    Date(String),
    /// The timestamp goes backwards relative to the previous message.
    #[error("timestamp {0} is earlier than the previous message")]
    OutOfOrder(String),
    /// A continuation line appeared before any message.
    #[error("continuation line without a preceding message")]
    Orphan,
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "uploaded export".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a line-level parse error for the WhatsApp format.
    pub fn whatsapp_parse(source: ParseErrorKind, line: usize) -> Self {
        ChatlensError::Parse {
            format: "WhatsApp TXT",
            source,
            line,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ChatlensError::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Creates a configuration error tied to a file.
    pub fn config_file(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ChatlensError::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Creates an unknown user error.
    pub fn unknown_user(user: impl Into<String>) -> Self {
        ChatlensError::UnknownUser(user.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatlensError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, ChatlensError::Config { .. })
    }
}

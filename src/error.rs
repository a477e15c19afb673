//! Error types for NSV encoding, decoding and the lift transform.
//!
//! Decoding a `&str` never fails: every Unicode string is a valid NSV table.
//! Errors only come from three places:
//!
//! - **Shape errors**: [`unlift`](crate::unlift) was handed something that is
//!   not exactly one row
//! - **I/O errors**: the underlying reader or writer failed, or a byte stream
//!   was not UTF-8
//! - **Serde errors**: a value cannot be laid out as a table, or a cell does not
//!   parse as the requested type
//!
//! ## Examples
//!
//! ```rust
//! use nsv::{unlift, Error};
//!
//! let err = unlift("a\n\nb\n\n").unwrap_err();
//! assert!(matches!(err, Error::Shape { rows: 2 }));
//! assert!(err.to_string().contains("exactly one row"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input to `unlift` did not decode to exactly one row.
    #[error("Shape error: expected exactly one row, found {rows}")]
    Shape { rows: usize },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A line in a byte stream was not valid UTF-8
    #[error("Invalid UTF-8 at line {line}")]
    InvalidUtf8 { line: usize },

    /// The value cannot be laid out as a table of rows and cells
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A cell or sequence did not match the requested type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a shape error for an `unlift` input that decoded to `rows` rows.
    pub fn shape(rows: usize) -> Self {
        Error::Shape { rows }
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an unsupported shape error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nsv::Error;
    ///
    /// let err = Error::unsupported_shape("top-level value must be a sequence");
    /// assert!(err.to_string().contains("Unsupported shape"));
    /// ```
    pub fn unsupported_shape(msg: &str) -> Self {
        Error::UnsupportedShape(msg.to_string())
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nsv::Error;
    ///
    /// let err = Error::type_mismatch("integer", "\"abc\"");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the soil-model crate.
//!
//! The recommendation engine itself never fails. These errors belong to the
//! callers around it: strict input validation and profile-file parsing.

use thiserror::Error;

/// Errors raised while validating or parsing soil profiles
#[derive(Error, Debug)]
pub enum SoilModelError {
    /// I/O error occurred while reading a profile file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a profile file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A measurement lies outside its physical domain
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Soil type is not one of the six known classes
    #[error("Unknown soil type: {0:?}")]
    UnknownSoilType(String),

    /// A measurement is NaN or infinite (usually a missing field)
    #[error("{field} is missing or not a finite number")]
    NonFinite { field: &'static str },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SoilModelError>;

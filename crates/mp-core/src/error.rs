//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into them
//! via `From` impls where a core operation can fail inside their own calls.

use thiserror::Error;

/// The error type for `mp-core` operations (clock, parameters, rates).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A numeric parameter fell outside its legal range.  The offending value
    /// is reported so callers can surface it unchanged.
    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `mp-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Check that `value` is a probability in `[0, 1]` (NaN rejected).
pub fn check_probability(name: &'static str, value: f64) -> CoreResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::InvalidParameter { name, value })
    }
}

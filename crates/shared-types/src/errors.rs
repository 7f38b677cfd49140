//! # Error Types
//!
//! Defines error types shared across tasks.

use thiserror::Error;

/// Errors raised when parsing a subscriber identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImsiError {
    /// No identity digits were supplied.
    #[error("IMSI is missing")]
    Missing,

    /// More digits than the identity buffer can hold.
    #[error("IMSI too long: {length} digits, maximum is {max}")]
    TooLong { length: usize, max: usize },

    /// A character other than an ASCII digit was found.
    #[error("IMSI contains a non-digit character at position {position}")]
    NonDigit { position: usize },
}

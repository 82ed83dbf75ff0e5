//! Error types for key parsing and construction.

use thiserror::Error;

/// Errors produced when constructing a [`Key`](crate::Key).
///
/// Both variants are recoverable: reject the input and move on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid identifier format: {0:?}")]
    InvalidFormat(String),

    #[error("identifier too long: {len} bytes exceeds maximum of {max}")]
    TooLong { len: usize, max: usize },
}

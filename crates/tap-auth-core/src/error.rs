//! # Error Types
//!
//! Errors raised while canonicalizing payloads or parsing operation records.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Verification mismatches are deliberately absent: they are reported as
//! data by the verifier, never raised.

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Error, Debug)]
pub enum TapError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The record does not carry the token-auth protocol tags, or has
    /// a malformed field.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Wire-format serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be decimal strings.
    #[error("float values are not permitted in canonical representations; use a decimal string for amount: {0}")]
    FloatRejected(f64),

    /// A redeem item carries an amount that is not a finite, non-negative
    /// decimal string.
    #[error("redeem item {index} has invalid amount {amount:?}: expected a non-negative decimal string")]
    InvalidAmount {
        /// Position of the offending item in `items`.
        index: usize,
        /// The rejected amount text.
        amount: String,
    },

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

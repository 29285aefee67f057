//! # Build Error Types
//!
//! Errors that abort [`build()`](crate::build). They are surfaced to the
//! caller immediately and never retried, since a retry under a new salt
//! would silently change the operation's hash.

use tap_auth_core::CanonicalizationError;
use tap_auth_crypto::CryptoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    /// The payload cannot be canonically serialized.
    #[error("payload cannot be canonicalized: {0}")]
    Serialization(#[from] CanonicalizationError),

    /// The signing key is malformed, or signing failed.
    #[error("signing failed: {0}")]
    InvalidKey(#[from] CryptoError),
}

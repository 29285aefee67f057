//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `tap-auth-crypto`.

use thiserror::Error;

/// Errors from key handling, signing and signature parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Private scalar is zero or not below the curve order, or a public key
    /// is not a valid curve point.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Signature components are malformed or out of range.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Signature does not verify for the given digest and key.
    #[error("secp256k1 verification failed: {0}")]
    VerificationFailed(String),
}

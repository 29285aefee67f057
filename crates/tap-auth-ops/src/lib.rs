//! # tap-auth-ops: Signed token-auth Operations
//!
//! Assembles and checks the records a token authority publishes:
//!
//! - [`build()`] canonicalizes payload + salt, hashes, signs, and returns a
//!   complete [`OperationRecord`].
//! - [`verify()`] re-derives everything from a round-tripped copy of the
//!   record and reports signature validity and the recovered signer key.
//! - [`generate()`] runs both, returning the record alongside its report.
//!
//! Every call takes its key pair and payload as arguments; nothing is held
//! between calls, so builds and verifications may run concurrently.
//!
//! [`OperationRecord`]: tap_auth_core::OperationRecord

pub mod builder;
pub mod error;
pub mod verifier;

pub use builder::build;
pub use error::BuildError;
pub use verifier::{verify, VerificationReport};

use tap_auth_core::{OperationRecord, Payload, Salt};
use tap_auth_crypto::KeyPair;

/// A freshly built record and the result of verifying it against the
/// authority's own public key.
#[derive(Debug, Clone)]
pub struct GeneratedOperation {
    pub record: OperationRecord,
    pub report: VerificationReport,
}

/// Build a signed operation and self-verify it.
pub fn generate(
    key_pair: &KeyPair,
    payload: impl Into<Payload>,
    salt: &Salt,
) -> Result<GeneratedOperation, BuildError> {
    let record = build(key_pair, payload, salt)?;
    let report = verify(&record, key_pair.public_key());
    Ok(GeneratedOperation { record, report })
}

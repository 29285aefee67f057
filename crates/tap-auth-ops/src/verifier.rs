//! # Self-Verification
//!
//! Checks a record the way an independent third party would, starting from
//! its wire text rather than the in-memory value:
//!
//! 1. Serialize the record and parse it back.
//! 2. Re-canonicalize payload + salt and re-hash.
//! 3. Verify the signature against the recomputed digest and claimed key.
//! 4. Recover the signer's key from (digest, signature, recovery id).
//!
//! Verification never fails. Every outcome, including records that cannot
//! be checked at all, comes back as a [`VerificationReport`].

use serde::Serialize;
use tap_auth_core::{sha256_digest, OperationRecord};
use tap_auth_crypto::{signer, PublicKey, RecoverableSignature};

/// Outcome of verifying a record against a claimed public key.
///
/// A record is trustworthy only when the signature verifies under the
/// claimed key, the key recovered from the signature is that same key, and
/// the stated hash matches the recomputed one; see
/// [`VerificationReport::is_trustworthy()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Signature verifies over the recomputed digest under the supplied key.
    #[serde(rename = "valid")]
    pub is_valid: bool,
    /// The record's `hash` field equals the recomputed digest.
    #[serde(rename = "hashMatches")]
    pub hash_matches: bool,
    #[serde(rename = "pub")]
    pub supplied_public_key: PublicKey,
    #[serde(rename = "pubRecovered")]
    pub recovered_public_key: Option<PublicKey>,
    /// Why the record could not be checked, if it could not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl VerificationReport {
    fn failed(supplied_public_key: &PublicKey, failure: String) -> Self {
        Self {
            is_valid: false,
            hash_matches: false,
            supplied_public_key: supplied_public_key.clone(),
            recovered_public_key: None,
            failure: Some(failure),
        }
    }

    /// The recovered signer key equals the supplied key.
    pub fn recovered_matches(&self) -> bool {
        self.recovered_public_key.as_ref() == Some(&self.supplied_public_key)
    }

    pub fn is_trustworthy(&self) -> bool {
        self.is_valid && self.hash_matches && self.recovered_matches()
    }
}

/// Verify a record against the public key its authority claims.
pub fn verify(record: &OperationRecord, public_key: &PublicKey) -> VerificationReport {
    let report = match check(record, public_key) {
        Ok(report) => report,
        Err(failure) => VerificationReport::failed(public_key, failure),
    };

    if report.is_trustworthy() {
        tracing::debug!(
            operation = %record.kind(),
            public_key = %public_key,
            "token-auth record verified"
        );
    } else {
        tracing::warn!(
            operation = %record.kind(),
            public_key = %public_key,
            valid = report.is_valid,
            hash_matches = report.hash_matches,
            recovered_matches = report.recovered_matches(),
            failure = report.failure.as_deref().unwrap_or(""),
            "token-auth record failed verification"
        );
    }
    report
}

fn check(record: &OperationRecord, public_key: &PublicKey) -> Result<VerificationReport, String> {
    let wire = record
        .to_json()
        .map_err(|e| format!("record does not serialize: {e}"))?;
    let copy = OperationRecord::from_json(&wire)
        .map_err(|e| format!("record does not round-trip: {e}"))?;

    let canonical = copy
        .payload()
        .canonicalize(&copy.salt())
        .map_err(|e| format!("payload cannot be canonicalized: {e}"))?;
    let digest = sha256_digest(&canonical);
    let hash_matches = copy.hash() == Some(digest.to_hex().as_str());

    let wire_sig = copy
        .signature()
        .ok_or_else(|| "record is unsigned".to_string())?;
    let signature = RecoverableSignature::from_wire(wire_sig).map_err(|e| e.to_string())?;

    let is_valid = signer::verify(&digest, &signature, public_key).is_ok();
    let recovered_public_key = signer::recover(&digest, &signature).ok();

    Ok(VerificationReport {
        is_valid,
        hash_matches,
        supplied_public_key: public_key.clone(),
        recovered_public_key,
        failure: None,
    })
}

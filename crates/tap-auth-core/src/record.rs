//! # Operation Record: Inscription Wire Format
//!
//! The record a token authority hands to the ledger publisher:
//!
//! ```text
//! {"p":"tap","op":"token-auth","sig":{"v":"0","r":"<dec>","s":"<dec>"},"hash":"<hex>","salt":"<str>","auth":[...]}
//! ```
//!
//! Field order is fixed: `p`, `op`, `sig`, `hash`, `salt`, then the payload
//! under its kind key (`auth` or `redeem`). Only payload + salt are hashed;
//! `sig` and `hash` are populated after the digest exists.

use serde::{Deserialize, Serialize};

use crate::digest::MessageDigest;
use crate::error::TapError;
use crate::payload::{OperationKind, Payload};
use crate::salt::Salt;

/// Protocol tag carried in the `p` field.
pub const PROTOCOL_TAG: &str = "tap";

/// Operation tag carried in the `op` field.
pub const OPERATION_TAG: &str = "token-auth";

/// Recoverable ECDSA signature in its textual wire form.
///
/// `v` is the recovery id, `r` and `s` are base-10 decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireSignature {
    /// Recovery id, `"0"` to `"3"`.
    pub v: String,
    /// `r` scalar in base 10.
    pub r: String,
    /// `s` scalar in base 10.
    pub s: String,
}

/// A token-auth operation record.
///
/// Fields are private; a record is created unsigned with
/// [`OperationRecord::new()`] and completed once with
/// [`OperationRecord::with_signature()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    p: String,
    op: String,
    sig: Option<WireSignature>,
    hash: Option<String>,
    salt: String,
    #[serde(flatten)]
    payload: Payload,
}

impl OperationRecord {
    /// An unsigned record: `sig` and `hash` are `null`.
    pub fn new(payload: Payload, salt: &Salt) -> Self {
        Self {
            p: PROTOCOL_TAG.to_string(),
            op: OPERATION_TAG.to_string(),
            sig: None,
            hash: None,
            salt: salt.as_str().to_string(),
            payload,
        }
    }

    /// Attach the digest that was signed and the signature over it.
    pub fn with_signature(mut self, digest: &MessageDigest, signature: WireSignature) -> Self {
        self.hash = Some(digest.to_hex());
        self.sig = Some(signature);
        self
    }

    /// Protocol tag, always `"tap"` for parsed records.
    pub fn protocol(&self) -> &str {
        &self.p
    }

    /// Operation tag, always `"token-auth"` for parsed records.
    pub fn operation(&self) -> &str {
        &self.op
    }

    /// Signature in wire form, `None` while unsigned.
    pub fn signature(&self) -> Option<&WireSignature> {
        self.sig.as_ref()
    }

    /// Hex digest as stated by the record. Verifiers recompute it.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Salt the payload was hashed with.
    pub fn salt(&self) -> Salt {
        Salt::from(self.salt.as_str())
    }

    /// The signed payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Operation kind of the payload.
    pub fn kind(&self) -> OperationKind {
        self.payload.kind()
    }

    /// Both `sig` and `hash` are present.
    pub fn is_signed(&self) -> bool {
        self.sig.is_some() && self.hash.is_some()
    }

    /// Compact JSON, the string that gets inscribed.
    pub fn to_json(&self) -> Result<String, TapError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an inscribed record, checking the protocol tags.
    pub fn from_json(s: &str) -> Result<Self, TapError> {
        let record: Self = serde_json::from_str(s)?;
        if record.p != PROTOCOL_TAG {
            return Err(TapError::Protocol(format!(
                "expected p = {PROTOCOL_TAG:?}, got {:?}",
                record.p
            )));
        }
        if record.op != OPERATION_TAG {
            return Err(TapError::Protocol(format!(
                "expected op = {OPERATION_TAG:?}, got {:?}",
                record.op
            )));
        }
        Ok(record)
    }
}

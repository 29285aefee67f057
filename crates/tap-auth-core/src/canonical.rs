//! # Canonical Serialization: Signed Message Bytes
//!
//! This module defines `CanonicalBytes`, the sole construction path for the
//! bytes that are hashed and signed by a token authority.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which lowers the payload
//! to a JSON value tree, rejects floats, serializes compactly and appends the
//! salt text. Any function that needs message bytes for a digest must accept
//! `&CanonicalBytes`, so a differently-serialized message cannot be hashed by
//! accident.
//!
//! ## Encoding Rules (`tap-token-auth/1`)
//!
//! 1. **Declared key order**: object keys appear in the order the payload
//!    struct declares them. Keys are NOT sorted; the value tree preserves
//!    insertion order (`serde_json/preserve_order`).
//! 2. **Arrays in order**: an empty array is emitted as `[]`, never omitted.
//! 3. **Reject floats**: amounts must be decimal strings. Float text differs
//!    between implementations, which would break independent re-verification.
//! 4. **Compact separators**: no whitespace, UTF-8 output, non-ASCII
//!    characters unescaped.
//! 5. **Salt suffix**: the salt's text is appended with no separator.
//!
//! The result is byte-identical to `JSON.stringify(payload) + String(salt)`
//! for every payload this crate can express.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;
use crate::salt::Salt;

/// Identifier of the canonical encoding produced by [`CanonicalBytes::new()`].
pub const CANONICAL_ENCODING_VERSION: &str = "tap-token-auth/1";

/// Message bytes produced exclusively by the canonical encoding.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are in declaration order, arrays in order.
/// - No float values anywhere in the serialized payload.
/// - The trailing bytes are exactly the salt text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical message bytes from a payload and a salt.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the payload contains
    /// float numbers. Returns `CanonicalizationError::SerializationFailed` if
    /// the payload cannot be serialized as JSON.
    pub fn new(payload: &impl Serialize, salt: &Salt) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(payload)?;
        let coerced = coerce_json_value(value)?;
        let mut bytes = serde_json::to_vec(&coerced)?;
        bytes.extend_from_slice(salt.as_str().as_bytes());
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes, salt included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk the value tree, rejecting non-integer numbers. Object entries are
/// re-inserted in their existing order.
fn coerce_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::payload::{AuthPayload, RedeemItem, RedeemPayload};
    use proptest::prelude::*;

    fn redeem_payload() -> impl Strategy<Value = RedeemPayload> {
        let item = ("[a-z]{1,8}", "[0-9]{1,6}(\\.[0-9]{1,4})?", "bc1[a-z0-9]{10,40}")
            .prop_map(|(t, a, addr)| RedeemItem::new(t, a, addr));
        (
            prop::collection::vec(item, 0..6),
            "[a-f0-9]{64}i[0-9]",
            "\\PC{0,30}",
        )
            .prop_map(|(items, auth, data)| RedeemPayload::new(items, auth, data))
    }

    proptest! {
        /// Canonicalization is deterministic: equal inputs give equal bytes.
        #[test]
        fn canonical_bytes_deterministic(redeem in redeem_payload(), salt in "\\PC{0,20}") {
            let salt = Salt::from(salt);
            let a = CanonicalBytes::new(&redeem, &salt).unwrap();
            let b = CanonicalBytes::new(&redeem.clone(), &salt.clone()).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// The payload prefix parses back to the same payload.
        #[test]
        fn canonical_prefix_is_payload_json(
            tickers in prop::collection::vec("[a-zA-Z0-9]{1,6}", 0..8)
        ) {
            let auth = AuthPayload::new(tickers);
            let salt = Salt::from("9");
            let cb = CanonicalBytes::new(&auth, &salt).unwrap();
            let bytes = cb.as_bytes();
            let prefix = &bytes[..bytes.len() - 1];
            let parsed: AuthPayload = serde_json::from_slice(prefix).unwrap();
            prop_assert_eq!(parsed, auth);
        }

        /// Canonical bytes are valid UTF-8.
        #[test]
        fn canonical_bytes_valid_utf8(redeem in redeem_payload(), salt in "\\PC{0,20}") {
            let cb = CanonicalBytes::new(&redeem, &Salt::from(salt)).unwrap();
            prop_assert!(std::str::from_utf8(cb.as_bytes()).is_ok());
        }
    }
}

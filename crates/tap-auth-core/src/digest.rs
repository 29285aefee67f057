//! # Message Digest
//!
//! SHA-256 over canonical message bytes. The digest is what the authority
//! signs, and its lowercase hex form is the record's `hash` field, which
//! redeem operations later cite as their auth reference.
//!
//! ## Security Invariant
//!
//! `MessageDigest` can only be computed from `CanonicalBytes`, enforced by
//! the signature of [`sha256_digest()`].

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::TapError;

/// A 32-byte SHA-256 message digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageDigest([u8; 32]);

impl MessageDigest {
    /// The raw 32-byte digest, used as the ECDSA prehash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex digest, e.g. a record's `hash` field.
    pub fn from_hex(s: &str) -> Result<Self, TapError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)
            .map_err(|e| TapError::Protocol(format!("invalid digest hex: {e}")))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Debug for MessageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MessageDigest({})", self.to_hex())
    }
}

impl std::fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the SHA-256 digest of canonical message bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> MessageDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    MessageDigest(bytes)
}

/// Compute the SHA-256 hex string of canonical message bytes.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::AuthPayload;
    use crate::salt::Salt;

    #[test]
    fn test_known_auth_vector() {
        // sha256(b'["gib"]0.5')
        let cb = CanonicalBytes::new(&AuthPayload::new(["gib"]), &Salt::from("0.5")).unwrap();
        assert_eq!(
            sha256_hex(&cb),
            "662ec0ebfe09dd01589ac7e096d1fcff582e5a46fb36288349b8be4ac229e321"
        );
    }

    #[test]
    fn test_known_empty_auth_vector() {
        // sha256(b'[]42')
        let cb = CanonicalBytes::new(&AuthPayload::all(), &Salt::from("42")).unwrap();
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "937e348f1ba93b6cecf3a38bb3ee21d8a2bf45e6f72dc27df411bf660307c364"
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let cb = CanonicalBytes::new(&AuthPayload::new(["tap"]), &Salt::from("1")).unwrap();
        let d = sha256_digest(&cb);
        assert_eq!(MessageDigest::from_hex(&d.to_hex()).unwrap(), d);
        assert_eq!(d.to_string().len(), 64);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(MessageDigest::from_hex("abcd").is_err());
        assert!(MessageDigest::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_different_salts_different_digests() {
        let auth = AuthPayload::new(["gib"]);
        let a = sha256_digest(&CanonicalBytes::new(&auth, &Salt::from("0.123")).unwrap());
        let b = sha256_digest(&CanonicalBytes::new(&auth, &Salt::from("0.456")).unwrap());
        assert_ne!(a, b);
    }
}

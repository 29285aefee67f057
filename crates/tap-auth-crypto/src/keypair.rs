//! # secp256k1 Key Pairs
//!
//! An authority's signing identity. Private scalars are drawn from the OS
//! CSPRNG and redrawn until they are nonzero and below the curve order.
//! Public keys are exchanged in compressed SEC1 form (33 bytes, 66 hex chars).
//!
//! ## Security Invariant
//!
//! - `KeyPair` does not implement `Serialize`, and its `Debug` output never
//!   contains the private scalar.
//! - The only way to get private key material out is
//!   [`KeyPair::private_key_hex()`], which returns a zeroizing buffer.

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tap_auth_core::MessageDigest;
use zeroize::{Zeroize, Zeroizing};

use crate::error::CryptoError;
use crate::signer::{self, RecoverableSignature};

/// A secp256k1 public key.
///
/// Serializes as a lowercase compressed SEC1 hex string.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

/// A secp256k1 key pair for signing token-auth operations.
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: PublicKey,
}

// ---------------------------------------------------------------------------
// PublicKey impls
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Parse a compressed (33-byte) or uncompressed (65-byte) SEC1 point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid secp256k1 public key: {e}")))
    }

    /// Parse a hex-encoded SEC1 point.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("public key is not hex: {e}")))?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Compressed SEC1 encoding (33 bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Lowercase hex of the compressed SEC1 encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(value: VerifyingKey) -> Self {
        Self(value)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// KeyPair impls
// ---------------------------------------------------------------------------

impl KeyPair {
    /// Generate a new random key pair.
    ///
    /// Draws 32 random bytes until they form a valid private scalar
    /// (nonzero, below the curve order). More than one draw happens with
    /// probability around 2^-128.
    pub fn generate() -> Self {
        let mut candidate = [0u8; 32];
        let mut draws: u32 = 0;
        let signing_key = loop {
            OsRng.fill_bytes(&mut candidate);
            draws += 1;
            if let Ok(key) = SigningKey::from_slice(&candidate) {
                break key;
            }
        };
        candidate.zeroize();
        tracing::trace!(draws, "generated secp256k1 key pair");
        Self::from_signing_key(signing_key)
    }

    /// Import a raw 32-byte private scalar.
    ///
    /// # Errors
    ///
    /// `InvalidKey` if the scalar is zero or not below the curve order.
    pub fn from_private_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        SigningKey::from_slice(bytes)
            .map(Self::from_signing_key)
            .map_err(|_| {
                CryptoError::InvalidKey(
                    "private key must be a nonzero scalar below the secp256k1 order".to_string(),
                )
            })
    }

    /// Import a hex-encoded 32-byte private scalar.
    pub fn from_private_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        hex::decode_to_slice(s.trim(), &mut bytes[..]).map_err(|e| {
            CryptoError::InvalidKey(format!("private key must be 64 hex chars: {e}"))
        })?;
        Self::from_private_bytes(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey(signing_key.verifying_key().clone());
        Self {
            signing_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Hex of the private scalar, for writing a key file.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        bytes.copy_from_slice(&self.signing_key.to_bytes());
        Zeroizing::new(hex::encode(&bytes[..]))
    }

    /// Sign a message digest with this key pair's private scalar.
    pub fn sign(&self, digest: &MessageDigest) -> Result<RecoverableSignature, CryptoError> {
        signer::sign_with_key(&self.signing_key, digest)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair(<private>, {})", self.public_key.to_hex())
    }
}

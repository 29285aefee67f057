//! # Recoverable ECDSA over Message Digests
//!
//! Signs the 32-byte SHA-256 [`MessageDigest`] directly as the ECDSA prehash
//! (no second hash), using RFC 6979 deterministic nonces and low-S
//! normalization. The recovery id lets anyone recover the signer's public
//! key from (digest, signature) alone.
//!
//! ## Security Invariant
//!
//! Signing input MUST be a `&MessageDigest`, which can only be computed from
//! `CanonicalBytes`. Raw bytes cannot be signed.
//!
//! ## Wire Form
//!
//! `{"v": "<recovery id>", "r": "<decimal>", "s": "<decimal>"}`, see
//! [`RecoverableSignature::to_wire()`].

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use tap_auth_core::{MessageDigest, WireSignature};

use crate::decimal;
use crate::error::CryptoError;
use crate::keypair::PublicKey;

/// An ECDSA signature with its public-key recovery id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    signature: Signature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Recovery id, `0..=3`.
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id.to_byte()
    }

    /// Big-endian bytes of the `r` scalar.
    pub fn r_bytes(&self) -> [u8; 32] {
        let (r, _) = self.signature.split_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&r);
        out
    }

    /// Big-endian bytes of the `s` scalar.
    pub fn s_bytes(&self) -> [u8; 32] {
        let (_, s) = self.signature.split_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&s);
        out
    }

    /// Textual wire form: recovery id and decimal `r`/`s`.
    pub fn to_wire(&self) -> WireSignature {
        WireSignature {
            v: self.recovery_id().to_string(),
            r: decimal::to_decimal(&self.r_bytes()),
            s: decimal::to_decimal(&self.s_bytes()),
        }
    }

    /// Parse the textual wire form.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` if `v` is not exactly one of `"0"`..`"3"`, or
    /// `r`/`s` are not decimal scalars in `1..n`.
    pub fn from_wire(wire: &WireSignature) -> Result<Self, CryptoError> {
        let recovery_id = match wire.v.as_str() {
            "0" => RecoveryId::from_byte(0),
            "1" => RecoveryId::from_byte(1),
            "2" => RecoveryId::from_byte(2),
            "3" => RecoveryId::from_byte(3),
            _ => None,
        }
        .ok_or_else(|| {
            CryptoError::InvalidSignature(format!(
                "recovery id must be one of \"0\"..\"3\", got {:?}",
                wire.v
            ))
        })?;
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&decimal::from_decimal(&wire.r)?);
        rs[32..].copy_from_slice(&decimal::from_decimal(&wire.s)?);
        let signature = Signature::from_slice(&rs).map_err(|_| {
            CryptoError::InvalidSignature(
                "r and s must be nonzero scalars below the secp256k1 order".to_string(),
            )
        })?;
        Ok(Self {
            signature,
            recovery_id,
        })
    }
}

/// Sign a digest with a raw 32-byte private scalar.
///
/// # Errors
///
/// `InvalidKey` if the scalar is zero or not below the curve order. The
/// signer never falls back to another key.
pub fn sign(
    digest: &MessageDigest,
    private_key: &[u8; 32],
) -> Result<RecoverableSignature, CryptoError> {
    let signing_key = SigningKey::from_slice(private_key).map_err(|_| {
        CryptoError::InvalidKey(
            "private key must be a nonzero scalar below the secp256k1 order".to_string(),
        )
    })?;
    sign_with_key(&signing_key, digest)
}

pub(crate) fn sign_with_key(
    signing_key: &SigningKey,
    digest: &MessageDigest,
) -> Result<RecoverableSignature, CryptoError> {
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| CryptoError::InvalidSignature(format!("signing failed: {e}")))?;
    Ok(RecoverableSignature {
        signature,
        recovery_id,
    })
}

/// Verify a signature over a digest against a claimed public key.
pub fn verify(
    digest: &MessageDigest,
    signature: &RecoverableSignature,
    public_key: &PublicKey,
) -> Result<(), CryptoError> {
    public_key
        .verifying_key()
        .verify_prehash(digest.as_bytes(), &signature.signature)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}

/// Recover the signer's public key from a digest and signature.
pub fn recover(
    digest: &MessageDigest,
    signature: &RecoverableSignature,
) -> Result<PublicKey, CryptoError> {
    VerifyingKey::recover_from_prehash(
        digest.as_bytes(),
        &signature.signature,
        signature.recovery_id,
    )
    .map(PublicKey::from)
    .map_err(|e| CryptoError::InvalidSignature(format!("public key recovery failed: {e}")))
}

//! # Operation Builder
//!
//! Field population order is fixed: payload + salt are canonicalized and
//! hashed first, the digest is signed, and only then are `hash` and `sig`
//! written into the record. The signature never feeds back into the hash.

use tap_auth_core::{
    sha256_digest, OperationRecord, Payload, Salt, CANONICAL_ENCODING_VERSION,
};
use tap_auth_crypto::KeyPair;

use crate::error::BuildError;

/// Build a signed token-auth operation record.
///
/// The operation kind (`auth` or `redeem`) follows from the payload variant.
///
/// # Errors
///
/// - `BuildError::Serialization` if a redeem amount is not a non-negative
///   decimal string, or the payload cannot be canonicalized.
/// - `BuildError::InvalidKey` if signing fails.
pub fn build(
    key_pair: &KeyPair,
    payload: impl Into<Payload>,
    salt: &Salt,
) -> Result<OperationRecord, BuildError> {
    let payload = payload.into();
    if let Payload::Redeem(redeem) = &payload {
        redeem.validate_amounts()?;
    }

    let canonical = payload.canonicalize(salt)?;
    let digest = sha256_digest(&canonical);
    let signature = key_pair.sign(&digest)?;

    tracing::debug!(
        operation = %payload.kind(),
        encoding = CANONICAL_ENCODING_VERSION,
        hash = %digest,
        recovery_id = signature.recovery_id(),
        "signed token-auth operation"
    );

    Ok(OperationRecord::new(payload, salt).with_signature(&digest, signature.to_wire()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tap_auth_core::{
        AuthPayload, CanonicalizationError, OperationKind, RedeemItem, RedeemPayload,
    };
    use tap_auth_crypto::RecoverableSignature;

    fn redeem(amt: &str) -> RedeemPayload {
        RedeemPayload::new(
            vec![RedeemItem::new("gib", amt, "bc1qrecipient")],
            "fd3664a56cf6d14b21504e5d83a3d4867ee256f06cbe3bddf2787d6a80a86078i0",
            "",
        )
    }

    #[test]
    fn auth_record_is_signed() {
        let kp = KeyPair::generate();
        let record = build(&kp, AuthPayload::new(["gib"]), &Salt::from("0.5")).unwrap();
        assert!(record.is_signed());
        assert_eq!(record.kind(), OperationKind::Auth);
        assert_eq!(record.protocol(), "tap");
        assert_eq!(record.operation(), "token-auth");
        assert_eq!(
            record.hash(),
            Some("662ec0ebfe09dd01589ac7e096d1fcff582e5a46fb36288349b8be4ac229e321")
        );
    }

    #[test]
    fn signature_fields_are_decimal_text() {
        let kp = KeyPair::generate();
        let record = build(&kp, redeem("546"), &Salt::from("7")).unwrap();
        let sig = record.signature().unwrap();
        assert!(["0", "1", "2", "3"].contains(&sig.v.as_str()));
        assert!(!sig.r.is_empty() && sig.r.bytes().all(|b| b.is_ascii_digit()));
        assert!(!sig.s.is_empty() && sig.s.bytes().all(|b| b.is_ascii_digit()));
        assert!(RecoverableSignature::from_wire(sig).is_ok());
    }

    #[test]
    fn same_inputs_give_same_record() {
        let kp = KeyPair::generate();
        let a = build(&kp, redeem("1.5"), &Salt::from("x")).unwrap();
        let b = build(&kp, redeem("1.5"), &Salt::from("x")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn salt_changes_hash() {
        let kp = KeyPair::generate();
        let a = build(&kp, AuthPayload::new(["gib"]), &Salt::from("0.123")).unwrap();
        let b = build(&kp, AuthPayload::new(["gib"]), &Salt::from("0.456")).unwrap();
        assert_ne!(a.hash(), b.hash());
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn empty_auth_builds_with_explicit_array() {
        let kp = KeyPair::generate();
        let record = build(&kp, AuthPayload::all(), &Salt::from("42")).unwrap();
        let json = record.to_json().unwrap();
        assert!(json.ends_with(r#""salt":"42","auth":[]}"#));
        assert_eq!(
            record.hash(),
            Some("937e348f1ba93b6cecf3a38bb3ee21d8a2bf45e6f72dc27df411bf660307c364")
        );
    }

    #[test]
    fn invalid_amount_fails_before_signing() {
        let kp = KeyPair::generate();
        for amt in ["NaN", "Infinity", "-5", ""] {
            match build(&kp, redeem(amt), &Salt::from("1")) {
                Err(BuildError::Serialization(CanonicalizationError::InvalidAmount {
                    index,
                    ..
                })) => assert_eq!(index, 0),
                other => panic!("expected InvalidAmount for {amt:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn redeem_record_wire_layout() {
        let kp = KeyPair::generate();
        let record = build(&kp, redeem("546"), &Salt::from("7")).unwrap();
        let json = record.to_json().unwrap();
        assert!(json.starts_with(r#"{"p":"tap","op":"token-auth","sig":{"v":""#));
        let hash_field = format!(r#"}},"hash":"{}","#, record.hash().unwrap());
        assert!(json.contains(&hash_field));
        assert!(json.ends_with(
            r#""salt":"7","redeem":{"items":[{"tick":"gib","amt":"546","address":"bc1qrecipient"}],"auth":"fd3664a56cf6d14b21504e5d83a3d4867ee256f06cbe3bddf2787d6a80a86078i0","data":""}}"#
        ));
    }
}

//! # Protocol Properties
//!
//! End-to-end checks over build + verify: round-trip validity, canonical
//! determinism, salt sensitivity, tamper detection, the empty-auth case and
//! cross-key rejection.

use proptest::prelude::*;
use tap_auth_core::{
    sha256_digest, AuthPayload, CanonicalBytes, OperationRecord, Payload, RedeemItem,
    RedeemPayload, Salt,
};
use tap_auth_crypto::KeyPair;
use tap_auth_ops::{build, generate, verify};

const AUTH_REF: &str = "fd3664a56cf6d14b21504e5d83a3d4867ee256f06cbe3bddf2787d6a80a86078i0";

fn redeem_payload() -> impl Strategy<Value = RedeemPayload> {
    let item = (
        "[a-z]{3,5}",
        "[0-9]{1,8}(\\.[0-9]{1,6})?",
        "bc1[a-z0-9]{20,58}",
    )
        .prop_map(|(tick, amt, address)| RedeemItem::new(tick, amt, address));
    (prop::collection::vec(item, 1..5), "\\PC{0,40}")
        .prop_map(|(items, data)| RedeemPayload::new(items, AUTH_REF, data))
}

fn payload() -> impl Strategy<Value = Payload> {
    prop_oneof![
        prop::collection::vec("[a-z]{3,5}", 0..5).prop_map(|t| Payload::Auth(AuthPayload::new(t))),
        redeem_payload().prop_map(Payload::Redeem),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn built_records_verify_and_recover(payload in payload(), salt in "\\PC{1,24}") {
        let kp = KeyPair::generate();
        let record = build(&kp, payload, &Salt::from(salt)).unwrap();
        let report = verify(&record, kp.public_key());
        prop_assert!(report.is_valid);
        prop_assert_eq!(report.recovered_public_key.as_ref(), Some(kp.public_key()));
        prop_assert!(report.is_trustworthy());
    }

    #[test]
    fn canonicalization_is_deterministic(payload in payload(), salt in "\\PC{0,24}") {
        let salt = Salt::from(salt);
        let a = payload.canonicalize(&salt).unwrap();
        let b = payload.clone().canonicalize(&salt.clone()).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn salt_sensitivity() {
    let kp = KeyPair::generate();
    let a = build(&kp, AuthPayload::new(["gib"]), &Salt::from("0.123")).unwrap();
    let b = build(&kp, AuthPayload::new(["gib"]), &Salt::from("0.456")).unwrap();
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn flipping_any_amount_byte_is_detected() {
    let kp = KeyPair::generate();
    let redeem = RedeemPayload::new(
        vec![RedeemItem::new("gib", "546", "bc1qrecipient")],
        AUTH_REF,
        "",
    );
    let record = build(&kp, redeem, &Salt::from("0.5")).unwrap();
    let wire: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

    let amt = "546";
    for pos in 0..amt.len() {
        let mut bytes = amt.as_bytes().to_vec();
        bytes[pos] ^= 0x01;
        let flipped = String::from_utf8(bytes).unwrap();

        let mut value = wire.clone();
        value["redeem"]["items"][0]["amt"] = flipped.clone().into();
        let tampered = OperationRecord::from_json(&value.to_string()).unwrap();

        let report = verify(&tampered, kp.public_key());
        assert!(
            !report.is_valid || !report.recovered_matches(),
            "flip at {pos} ({flipped}) went undetected"
        );
        assert!(!report.is_trustworthy());
    }
}

#[test]
fn empty_auth_with_salt_42() {
    let kp = KeyPair::generate();
    let out = generate(&kp, AuthPayload::all(), &Salt::from(42u64)).unwrap();
    assert!(out.report.is_trustworthy());

    let value: serde_json::Value = serde_json::from_str(&out.record.to_json().unwrap()).unwrap();
    assert_eq!(value["auth"], serde_json::json!([]));
    assert_eq!(value["salt"], "42");
    assert!(value.get("redeem").is_none());
}

#[test]
fn cross_key_rejection() {
    let authority = KeyPair::generate();
    let impostor = KeyPair::generate();
    let record = build(&authority, AuthPayload::new(["gib", "tap"]), &Salt::random()).unwrap();
    let report = verify(&record, impostor.public_key());
    assert!(!report.is_valid);
    assert!(!report.is_trustworthy());
}

#[test]
fn stated_hash_is_digest_of_payload_and_salt() {
    let kp = KeyPair::generate();
    let auth = AuthPayload::new(["gib"]);
    let salt = Salt::from("inscription-id-i0");
    let record = build(&kp, auth.clone(), &salt).unwrap();
    let expected = sha256_digest(&CanonicalBytes::new(&auth, &salt).unwrap());
    assert_eq!(record.hash(), Some(expected.to_hex().as_str()));
}

#[test]
fn concurrent_builds_are_independent() {
    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            std::thread::spawn(move || {
                let kp = KeyPair::generate();
                let out = generate(&kp, AuthPayload::new(["gib"]), &Salt::from(i)).unwrap();
                out.report.is_trustworthy()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

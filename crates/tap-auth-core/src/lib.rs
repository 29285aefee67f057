#![deny(missing_docs)]

//! # tap-auth-core: Foundational Types for TAP token-auth
//!
//! This crate defines the data that a token authority signs and publishes:
//! auth and redeem payloads, the caller-supplied salt, the canonical message
//! bytes, the SHA-256 message digest, and the operation record that is later
//! inscribed on the ledger. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** The message that gets hashed is always
//!    `serialize(payload) ++ salt`, produced by [`CanonicalBytes::new()`].
//!    No other path yields bytes that can be digested.
//!
//! 2. **Declared field order.** Payload structs serialize with keys in the
//!    order they are declared, arrays in order, compact separators. Any
//!    independent verifier can reproduce the bytes without a sorting rule.
//!
//! 3. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest flows through canonicalization.
//!
//! 4. **Signatures are never hashed.** [`OperationRecord`] keeps the payload
//!    and salt separate from the `sig` and `hash` fields, so re-serializing a
//!    signed record cannot perturb the digest that was signed.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tap-auth-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod payload;
pub mod record;
pub mod salt;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalBytes, CANONICAL_ENCODING_VERSION};
pub use digest::{sha256_digest, sha256_hex, MessageDigest};
pub use error::{CanonicalizationError, TapError};
pub use payload::{AuthPayload, OperationKind, Payload, RedeemItem, RedeemPayload};
pub use record::{OperationRecord, WireSignature, OPERATION_TAG, PROTOCOL_TAG};
pub use salt::Salt;

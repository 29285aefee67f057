//! # tap-auth-crypto: secp256k1 Primitives
//!
//! Provides the elliptic-curve building blocks for TAP token-auth:
//!
//! - **Key pairs** on secp256k1, drawn from the OS CSPRNG with retry until
//!   the scalar is valid.
//! - **Recoverable ECDSA** (RFC 6979, low-S) over a [`MessageDigest`]
//!   (the only valid signing input, enforcing canonicalization).
//! - **Public-key recovery** from digest + signature + recovery id.
//! - **Decimal scalars** for the textual `r`/`s` wire convention.
//!
//! ## Crate Policy
//!
//! - Depends only on `tap-auth-core` internally.
//! - Private keys never implement `Serialize` and never appear in `Debug`.
//! - No mocking of cryptographic operations in tests.
//!
//! [`MessageDigest`]: tap_auth_core::MessageDigest

pub mod decimal;
pub mod error;
pub mod keypair;
pub mod signer;

pub use error::CryptoError;
pub use keypair::{KeyPair, PublicKey};
pub use signer::{recover, sign, verify, RecoverableSignature};

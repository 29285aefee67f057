//! # tap-auth-cli: Command-Line Interface for Token Authorities
//!
//! Provides the `tap-auth` binary.
//!
//! ## Subcommands
//!
//! - `tap-auth keygen`: Generate a secp256k1 key pair into key files.
//! - `tap-auth auth`: Sign an auth operation for a list of tickers.
//! - `tap-auth redeem`: Sign a redeem operation read from a JSON/YAML file.
//! - `tap-auth verify`: Verify a record file against a public key.
//!
//! ```bash
//! tap-auth keygen --output keys --prefix authority
//! tap-auth --config authority.yaml auth gib --salt 0.5
//! tap-auth redeem --key keys/authority.key redeem.yaml
//! tap-auth verify --pubkey keys/authority.pub record.json
//! ```
//!
//! Publishing the printed record to the ledger is left to the caller.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; protocol logic stays in `tap-auth-ops`.
//! - Handlers return an exit code; `anyhow` errors are reserved for I/O and
//!   malformed input.

pub mod config;
pub mod keys;
pub mod operation;
pub mod verify;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to a base directory.
///
/// Absolute paths are returned as-is. Relative paths are joined onto `base`
/// if the result exists, otherwise left relative to the current directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let based = base.join(path);
    if based.exists() {
        based
    } else {
        path.to_path_buf()
    }
}

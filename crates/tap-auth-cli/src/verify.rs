//! # Verify Subcommand
//!
//! Checks a published record against the authority's public key and prints
//! the verification report. Exit code 0 only when the record is trustworthy.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tap_auth_core::OperationRecord;
use tap_auth_ops::verify;

use crate::config::CliConfig;
use crate::keys::load_public_key;

/// Arguments for `tap-auth verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Public key file (hex). Falls back to `pubkey_file` from the config.
    #[arg(long)]
    pub pubkey: Option<PathBuf>,
    /// Record file as printed by `auth`/`redeem`.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run_verify(args: &VerifyArgs, config: &CliConfig) -> Result<u8> {
    let pubkey_path = args
        .pubkey
        .as_ref()
        .or(config.pubkey_file.as_ref())
        .ok_or_else(|| {
            anyhow!("no public key given: pass --pubkey or set pubkey_file in --config")
        })?;
    let public_key = load_public_key(pubkey_path)?;

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read record: {}", args.file.display()))?;
    let record = OperationRecord::from_json(content.trim())
        .with_context(|| format!("not a token-auth record: {}", args.file.display()))?;

    let report = verify(&record, &public_key);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.is_trustworthy() {
        println!("OK: {} record is signed by {public_key}", record.kind());
        Ok(0)
    } else {
        println!("FAIL: {} record is not trustworthy", record.kind());
        Ok(1)
    }
}

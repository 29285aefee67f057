//! # Auth and Redeem Subcommands
//!
//! Build a signed operation, self-verify it against the key's own public
//! key, and print the record JSON ready for inscription. A record that fails
//! self-verification is still printed, with exit code 1.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tap_auth_core::{AuthPayload, Payload, RedeemPayload, Salt};
use tap_auth_crypto::KeyPair;
use tap_auth_ops::{generate, GeneratedOperation};

use crate::config::CliConfig;
use crate::keys::load_key_pair;

/// Options shared by `auth` and `redeem`.
#[derive(Args, Debug, Clone, Default)]
pub struct SigningOptions {
    /// Private key file (hex). Falls back to `key_file` from the config.
    #[arg(long)]
    pub key: Option<PathBuf>,
    /// Salt appended to the signed message. Use something unique, such as
    /// an inscription id. Defaults to a random value.
    #[arg(long)]
    pub salt: Option<String>,
    /// Also print the verification report.
    #[arg(long)]
    pub report: bool,
    /// Write the record to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `tap-auth auth`.
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(flatten)]
    pub options: SigningOptions,
    /// Tickers to authorize. None authorizes every ticker the authority
    /// controls.
    #[arg(value_name = "TICKER")]
    pub tickers: Vec<String>,
}

/// Arguments for `tap-auth redeem`.
#[derive(Args, Debug)]
pub struct RedeemArgs {
    #[command(flatten)]
    pub options: SigningOptions,
    /// Redeem payload file (`.json`, `.yaml` or `.yml`) with `items`,
    /// `auth` and `data`.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run_auth(args: &AuthArgs, config: &CliConfig) -> Result<u8> {
    let payload = AuthPayload::new(args.tickers.iter().cloned());
    emit(&args.options, config, payload.into())
}

pub fn run_redeem(args: &RedeemArgs, config: &CliConfig) -> Result<u8> {
    let payload = read_redeem_payload(&args.file)?;
    emit(&args.options, config, payload.into())
}

/// Parse a redeem payload from JSON or YAML, chosen by file extension.
pub fn read_redeem_payload(path: &Path) -> Result<RedeemPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read redeem payload: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

fn signing_key(options: &SigningOptions, config: &CliConfig) -> Result<KeyPair> {
    let path = options
        .key
        .as_ref()
        .or(config.key_file.as_ref())
        .ok_or_else(|| anyhow!("no private key given: pass --key or set key_file in --config"))?;
    load_key_pair(path)
}

fn emit(options: &SigningOptions, config: &CliConfig, payload: Payload) -> Result<u8> {
    let key_pair = signing_key(options, config)?;
    let salt = match &options.salt {
        Some(salt) => Salt::from(salt.as_str()),
        None => {
            let salt = Salt::random();
            tracing::info!(salt = %salt, "no salt given, using a random one");
            salt
        }
    };

    let GeneratedOperation { record, report } =
        generate(&key_pair, payload, &salt).context("failed to build operation")?;
    let json = record.to_json()?;

    match &options.out {
        Some(path) => std::fs::write(path, &json)
            .with_context(|| format!("failed to write record: {}", path.display()))?,
        None => println!("{json}"),
    }
    if options.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if report.is_trustworthy() {
        Ok(0)
    } else {
        tracing::error!("self-verification failed for the generated record");
        Ok(1)
    }
}

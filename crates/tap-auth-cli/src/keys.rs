//! # Keygen Subcommand and Key Files
//!
//! Key files hold a single hex line: 64 chars for the private scalar,
//! 66 chars for the compressed public key. Storing the private key file
//! safely is up to the operator.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tap_auth_crypto::{KeyPair, PublicKey};

/// Arguments for `tap-auth keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the key files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Prefix for the key filenames.
    #[arg(long, default_value = "authority")]
    pub prefix: String,
}

/// Generate a new key pair and write `<prefix>.key` / `<prefix>.pub`.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let output_dir = &args.output;
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let key_pair = KeyPair::generate();
    let pub_hex = key_pair.public_key().to_hex();

    let key_path = output_dir.join(format!("{}.key", args.prefix));
    let pub_path = output_dir.join(format!("{}.pub", args.prefix));
    if key_path.exists() {
        bail!("refusing to overwrite existing key: {}", key_path.display());
    }

    std::fs::write(&key_path, key_pair.private_key_hex().as_bytes())
        .with_context(|| format!("failed to write private key: {}", key_path.display()))?;
    std::fs::write(&pub_path, &pub_hex)
        .with_context(|| format!("failed to write public key: {}", pub_path.display()))?;

    tracing::info!(public_key = %pub_hex, "generated authority key pair");
    println!("OK: generated secp256k1 key pair");
    println!("  Private key: {}", key_path.display());
    println!("  Public key:  {}", pub_path.display());
    println!("  Public key (hex): {pub_hex}");
    Ok(0)
}

/// Read a private key file.
pub fn load_key_pair(path: &Path) -> Result<KeyPair> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read private key: {}", path.display()))?;
    KeyPair::from_private_hex(content.trim())
        .with_context(|| format!("invalid private key in {}", path.display()))
}

/// Read a public key file.
pub fn load_public_key(path: &Path) -> Result<PublicKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read public key: {}", path.display()))?;
    PublicKey::from_hex(content.trim())
        .with_context(|| format!("invalid public key in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keygen_into(dir: &Path) {
        let args = KeygenArgs {
            output: dir.to_path_buf(),
            prefix: "test".to_string(),
        };
        assert_eq!(run_keygen(&args).unwrap(), 0);
    }

    #[test]
    fn keygen_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        keygen_into(dir.path());

        let key = std::fs::read_to_string(dir.path().join("test.key")).unwrap();
        assert_eq!(key.len(), 64);
        let public = std::fs::read_to_string(dir.path().join("test.pub")).unwrap();
        assert_eq!(public.len(), 66);
    }

    #[test]
    fn key_files_load_as_matching_pair() {
        let dir = tempfile::tempdir().unwrap();
        keygen_into(dir.path());

        let kp = load_key_pair(&dir.path().join("test.key")).unwrap();
        let pk = load_public_key(&dir.path().join("test.pub")).unwrap();
        assert_eq!(kp.public_key(), &pk);
    }

    #[test]
    fn keygen_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        keygen_into(dir.path());
        let args = KeygenArgs {
            output: dir.path().to_path_buf(),
            prefix: "test".to_string(),
        };
        assert!(run_keygen(&args).is_err());
    }

    #[test]
    fn invalid_key_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.key");
        std::fs::write(&path, "00".repeat(32)).unwrap();
        assert!(load_key_pair(&path).is_err());
        assert!(load_key_pair(&dir.path().join("missing.key")).is_err());
    }
}

//! # CLI Configuration
//!
//! Optional YAML file passed with the global `--config` flag. It only
//! supplies defaults; explicit command-line flags win.
//!
//! ```yaml
//! key_file: keys/authority.key
//! pubkey_file: keys/authority.pub
//! ```
//!
//! Relative paths are resolved against the config file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Hex-encoded private key file used by `auth` and `redeem`.
    pub key_file: Option<PathBuf>,
    /// Hex-encoded public key file used by `verify`.
    pub pubkey_file: Option<PathBuf>,
}

impl CliConfig {
    /// Load the config file, or return defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.key_file = config.key_file.map(|p| crate::resolve_path(&p, base));
        config.pubkey_file = config.pubkey_file.map(|p| crate::resolve_path(&p, base));

        tracing::debug!(config = %path.display(), "loaded CLI config");
        Ok(config)
    }
}

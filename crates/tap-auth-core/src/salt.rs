//! # Salt
//!
//! The salt is appended to the serialized payload so that two operations
//! with identical payloads still hash differently. The core never checks
//! uniqueness; an authority that needs to re-index its signed operations
//! should use something unique it already tracks, such as an inscription id.

use serde::{Deserialize, Serialize};

/// Caller-supplied uniqueness value, held in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(String);

impl Salt {
    /// Build a salt from anything with a textual form.
    pub fn new(value: impl ToString) -> Self {
        Self(value.to_string())
    }

    /// Draw a fresh salt from the OS CSPRNG (UUID v4, simple form).
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// The exact text appended to the canonical message.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Salt {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Salt {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Salt {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for Salt {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

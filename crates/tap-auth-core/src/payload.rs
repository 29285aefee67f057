//! # Operation Payloads
//!
//! The two things a token authority can sign:
//!
//! - **auth**: the tickers the authority permits. An empty list means every
//!   ticker the authority controls.
//! - **redeem**: recipients allowed to claim amounts of a ticker, bound to a
//!   prior auth operation by its hash reference.
//!
//! Field declaration order is part of the wire contract: the canonical
//! encoding emits keys exactly in the order declared here.

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;
use crate::salt::Salt;

/// Operation kind, which is also the record key the payload lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Declares the permitted tickers.
    Auth,
    /// Authorizes recipients to claim amounts.
    Redeem,
}

impl OperationKind {
    /// Wire key for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Redeem => "redeem",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tickers permitted by an authority. Serializes as a bare JSON array,
/// `[]` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthPayload {
    tickers: Vec<String>,
}

impl AuthPayload {
    /// Authorization limited to the given tickers, in order.
    pub fn new<I, T>(tickers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }

    /// Authorization for every ticker the authority controls.
    pub fn all() -> Self {
        Self::default()
    }

    /// The listed tickers; empty for an unrestricted authorization.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// True when the authority authorizes all of its tickers.
    pub fn is_unrestricted(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// A single recipient entitlement inside a redeem operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedeemItem {
    /// Ticker being redeemed.
    pub tick: String,
    /// Decimal string; never a JSON number.
    pub amt: String,
    /// Recipient address.
    pub address: String,
}

impl RedeemItem {
    /// Build an item from its three fields.
    pub fn new(
        tick: impl Into<String>,
        amt: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            tick: tick.into(),
            amt: amt.into(),
            address: address.into(),
        }
    }
}

/// Recipients and amounts authorized by a prior auth operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedeemPayload {
    /// Entitlements, in the order they are signed.
    pub items: Vec<RedeemItem>,
    /// Hash reference of the auth operation this redeem belongs to.
    pub auth: String,
    /// Free-form data carried along with the redeem.
    pub data: String,
}

impl RedeemPayload {
    /// Build a redeem payload. Amounts are checked at build time, not here.
    pub fn new(items: Vec<RedeemItem>, auth: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            items,
            auth: auth.into(),
            data: data.into(),
        }
    }

    /// Check every amount is a finite, non-negative decimal string
    /// (`[0-9]+` optionally followed by `.` and `[0-9]+`).
    pub fn validate_amounts(&self) -> Result<(), CanonicalizationError> {
        for (index, item) in self.items.iter().enumerate() {
            if !is_decimal_amount(&item.amt) {
                return Err(CanonicalizationError::InvalidAmount {
                    index,
                    amount: item.amt.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Payload of an operation record, keyed by its kind on the wire
/// (`"auth": [...]` or `"redeem": {...}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    /// `"auth": [...]`
    Auth(AuthPayload),
    /// `"redeem": {...}`
    Redeem(RedeemPayload),
}

impl Payload {
    /// Kind of operation this payload belongs to.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Auth(_) => OperationKind::Auth,
            Self::Redeem(_) => OperationKind::Redeem,
        }
    }

    /// Canonical message bytes for this payload and salt.
    ///
    /// Only the inner payload is serialized; the kind key is not part of
    /// the signed message.
    pub fn canonicalize(&self, salt: &Salt) -> Result<CanonicalBytes, CanonicalizationError> {
        match self {
            Self::Auth(auth) => CanonicalBytes::new(auth, salt),
            Self::Redeem(redeem) => CanonicalBytes::new(redeem, salt),
        }
    }
}

impl From<AuthPayload> for Payload {
    fn from(value: AuthPayload) -> Self {
        Self::Auth(value)
    }
}

impl From<RedeemPayload> for Payload {
    fn from(value: RedeemPayload) -> Self {
        Self::Redeem(value)
    }
}

fn is_decimal_amount(amt: &str) -> bool {
    let (int, frac) = match amt.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (amt, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.map_or(true, digits)
}

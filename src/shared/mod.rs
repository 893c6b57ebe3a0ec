//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ─── ProjectId ───────────────────────────────────────────────────────────────

/// Newtype for project identifiers.
///
/// The backend stores integer ids but the control panel selects them as
/// checkbox values, so both `1` and `"1"` deserialize to the same id.
/// Always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as an integer, if it is one.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for ProjectId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProjectId(s.to_string()))
    }
}

impl Serialize for ProjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_util::string_or_number::deserialize(deserializer).map(ProjectId)
    }
}

// ─── PublicKey ───────────────────────────────────────────────────────────────

/// A Stellar account public key (`G...` strkey) as handed out by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PublicKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PublicKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PublicKey(s))
    }
}

// ─── TransactionXdr ──────────────────────────────────────────────────────────

/// A serialized transaction envelope (base64 XDR), signed or unsigned.
///
/// Opaque to the SDK: passed through unmodified between the backend and the
/// wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionXdr(String);

impl TransactionXdr {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TransactionXdr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionXdr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TransactionXdr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── TransactionHash ─────────────────────────────────────────────────────────

/// Hash of a transaction accepted by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(String);

impl TransactionHash {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ─── Amount ──────────────────────────────────────────────────────────────────

/// A positive whole number of lumens (minimum 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

/// Why a raw amount was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    NotANumber(String),
    NotAnInteger(String),
    NotPositive(String),
    TooLarge(String),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::NotANumber(raw) => write!(f, "'{raw}' is not a number"),
            AmountError::NotAnInteger(raw) => write!(f, "'{raw}' is not an integer"),
            AmountError::NotPositive(raw) => write!(f, "'{raw}' is not positive"),
            AmountError::TooLarge(raw) => write!(f, "'{raw}' is too large"),
        }
    }
}

impl std::error::Error for AmountError {}

impl Amount {
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parse a form value. Whole-valued decimals such as `"5.0"` are accepted.
    ///
    /// Digits are checked as text so no value is ever rounded.
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(whole) || !fraction.map_or(true, is_digits) {
            return Err(AmountError::NotANumber(raw.to_string()));
        }
        let whole_is_zero = whole.bytes().all(|b| b == b'0');
        let fraction_is_zero = fraction.map_or(true, |f| f.bytes().all(|b| b == b'0'));
        if negative || (whole_is_zero && fraction_is_zero) {
            return Err(AmountError::NotPositive(raw.to_string()));
        }
        if !fraction_is_zero {
            return Err(AmountError::NotAnInteger(raw.to_string()));
        }

        let value = whole
            .parse::<u64>()
            .map_err(|_| AmountError::TooLarge(raw.to_string()))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_util::string_or_number::deserialize(deserializer)?;
        Amount::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ─── OperationType ───────────────────────────────────────────────────────────

/// Admin batch operation: pay out to project owners or return donations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Fund,
    Refund,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fund => "fund",
            Self::Refund => "refund",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fund" => Ok(Self::Fund),
            "refund" => Ok(Self::Refund),
            other => Err(format!("unknown operation type: {other}")),
        }
    }
}

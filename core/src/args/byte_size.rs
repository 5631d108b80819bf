use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref BYTE_SIZE_RE: Regex =
        Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*([kmgtpe]?)(?:i?b)?$").expect("valid byte size regex");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid byte size: {0:?}")]
pub struct ParseByteSizeError(String);

/// A byte count. Parses the size/rate strings youtube-dl accepts (`50K`,
/// `4.2M`, `1G`), with binary multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteSize(u64);

impl ByteSize {
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn kib(n: u64) -> Self {
        Self(n * 1024)
    }

    pub const fn mib(n: u64) -> Self {
        Self(n * 1024 * 1024)
    }

    pub const fn gib(n: u64) -> Self {
        Self(n * 1024 * 1024 * 1024)
    }

    pub const fn bytes(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ByteSize {
    type Err = ParseByteSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = BYTE_SIZE_RE
            .captures(s.trim())
            .ok_or_else(|| ParseByteSizeError(s.to_string()))?;

        let number: f64 = caps[1]
            .parse()
            .map_err(|_| ParseByteSizeError(s.to_string()))?;
        let exponent = match caps[2].to_ascii_lowercase().as_str() {
            "" => 0,
            "k" => 1,
            "m" => 2,
            "g" => 3,
            "t" => 4,
            "p" => 5,
            _ => 6,
        };

        let bytes = number * 1024f64.powi(exponent);
        if !bytes.is_finite() || bytes > u64::MAX as f64 {
            return Err(ParseByteSizeError(s.to_string()));
        }
        Ok(Self(bytes.round() as u64))
    }
}

impl From<u64> for ByteSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

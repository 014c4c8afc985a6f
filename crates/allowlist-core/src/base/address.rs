//! Account address type used as the allowlist identifier.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::utils::strip_hex_prefix;

/// Size in bytes of an account address.
pub const ADDRESS_SIZE: usize = 20;

/// A 20-byte account address.
///
/// Parsed from 40 hex characters with an optional `0x` prefix, displayed as
/// lowercase `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Create a new address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

/// Errors produced while parsing addresses.
#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    /// The hex string does not encode exactly 20 bytes.
    #[error("Invalid address length: expected {expected} hex chars, got {actual}")]
    InvalidLength {
        /// Expected number of hex characters.
        expected: usize,
        /// Actual number of hex characters.
        actual: usize,
    },

    /// The string contains non-hex characters.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The zero address can never sign a transaction.
    #[error("Zero address not allowed")]
    ZeroAddress,

    /// Parsing failed on a specific line of an address list.
    #[error("Line {line}: {source}")]
    Line {
        /// 1-based line number.
        line: usize,
        /// The underlying parse error.
        #[source]
        source: Box<Self>,
    },
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = strip_hex_prefix(s.trim());
        let expected = ADDRESS_SIZE.saturating_mul(2);
        if cleaned.len() != expected {
            return Err(AddressError::InvalidLength {
                expected,
                actual: cleaned.len(),
            });
        }
        let mut bytes = [0_u8; ADDRESS_SIZE];
        hex::decode_to_slice(cleaned, &mut bytes)?;
        if bytes == [0_u8; ADDRESS_SIZE] {
            return Err(AddressError::ZeroAddress);
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_SIZE] {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Parse a newline separated address list.
///
/// Blank lines and lines starting with `#` are skipped. Duplicates are kept;
/// the tree decides how to treat them.
///
/// # Errors
/// Returns [`AddressError::Line`] wrapping the first invalid entry.
pub fn parse_address_list(text: &str) -> Result<Vec<Address>, AddressError> {
    let mut addresses = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let address = trimmed.parse().map_err(|source| AddressError::Line {
            line: index.saturating_add(1),
            source: Box::new(source),
        })?;
        addresses.push(address);
    }
    Ok(addresses)
}

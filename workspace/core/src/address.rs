//! Account addresses derived from secp256k1 public keys.
use k256::{ecdsa::VerifyingKey, elliptic_curve::sec1::ToEncodedPoint};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use sha3::{Digest, Keccak256};
use std::{fmt, str::FromStr};

use crate::Error;

/// Strip an optional `0x` or `0X` prefix.
pub(crate) fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Address of an account.
///
/// Equality is over the underlying bytes so the casing of the
/// hexadecimal form never matters.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Address([u8; 20]);

impl Address {
    /// Derive the address for a public key.
    ///
    /// The address is the last 20 bytes of the Keccak-256 digest
    /// of the uncompressed point without the SEC1 tag byte.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let digest = Keccak256::digest(&point.as_bytes()[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[12..]);
        Self(address)
    }

    /// Lowercase hexadecimal form with a `0x` prefix.
    pub fn to_lowercase_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Determine if a claimed address refers to this address.
    ///
    /// Only the lowercase forms are compared, the claim is otherwise
    /// taken as given.
    pub fn matches(&self, claimed: &str) -> bool {
        self.to_lowercase_hex() == claimed.to_lowercase()
    }

    /// Mixed-case checksum encoding.
    ///
    /// SEE: https://eips.ethereum.org/EIPS/eip-55
    fn checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::digest(lower.as_bytes());
        let mut encoded = String::with_capacity(42);
        encoded.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if nibble >= 8 {
                encoded.push(c.to_ascii_uppercase());
            } else {
                encoded.push(c);
            }
        }
        encoded
    }
}

impl From<[u8; 20]> for Address {
    fn from(value: [u8; 20]) -> Self {
        Self(value)
    }
}

impl From<&VerifyingKey> for Address {
    fn from(value: &VerifyingKey) -> Self {
        Address::from_verifying_key(value)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.checksum())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = strip_hex_prefix(s);
        if value.len() != 40 {
            return Err(Error::InvalidAddress(s.to_owned()));
        }
        let bytes = hex::decode(value)
            .map_err(|_| Error::InvalidAddress(s.to_owned()))?;
        let address: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::InvalidAddress(s.to_owned()))?;
        Ok(Self(address))
    }
}

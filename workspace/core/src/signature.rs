//! Recoverable signatures in the `r || s || v` wire format.
use k256::{
    ecdsa::{self, recoverable},
    FieldBytes,
};
use std::{fmt, str::FromStr};

use crate::{address::strip_hex_prefix, Address, Error, Result};

/// Length of an encoded signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Order of the secp256k1 group.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Half the order of the secp256k1 group.
const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d,
    0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Offset used by wallets when encoding the recovery identifier.
const RECOVERY_OFFSET: u8 = 27;

/// Signature with a recovery identifier.
///
/// Parsing only checks the structure of the signature, whether a
/// public key can be recovered is determined by [Signature::recover].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
    /// Normalized recovery identifier, either zero or one.
    v: u8,
}

impl Signature {
    /// Parse a signature from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::MalformedSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            )));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);

        let v = match bytes[64] {
            0 | 1 => bytes[64],
            27 | 28 => bytes[64] - RECOVERY_OFFSET,
            other => {
                return Err(Error::MalformedSignature(format!(
                    "unsupported recovery identifier {}",
                    other
                )))
            }
        };

        // Big-endian byte arrays of equal length compare numerically
        if r >= CURVE_ORDER || s >= CURVE_ORDER {
            return Err(Error::MalformedSignature(
                "scalar exceeds the curve order".to_owned(),
            ));
        }

        // Wallets only produce the lower form of s (EIP-2)
        if s > HALF_CURVE_ORDER {
            return Err(Error::MalformedSignature(
                "non-canonical s value".to_owned(),
            ));
        }

        Ok(Self { r, s, v })
    }

    /// Recovery identifier, either zero or one.
    pub fn recovery_id(&self) -> u8 {
        self.v
    }

    /// Encode as bytes using the wallet convention of 27 or 28
    /// for the recovery identifier.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v + RECOVERY_OFFSET;
        bytes
    }

    /// Recover the address of the key that signed a digest.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<Address> {
        if self.r == [0u8; 32] || self.s == [0u8; 32] {
            return Err(Error::RecoveryFailed);
        }

        let mut scalars = [0u8; 64];
        scalars[0..32].copy_from_slice(&self.r);
        scalars[32..64].copy_from_slice(&self.s);

        let signature = ecdsa::Signature::try_from(scalars.as_slice())
            .map_err(|_| Error::RecoveryFailed)?;
        let id =
            recoverable::Id::new(self.v).map_err(|_| Error::RecoveryFailed)?;
        let recoverable = recoverable::Signature::new(&signature, id)
            .map_err(|_| Error::RecoveryFailed)?;

        let digest = FieldBytes::clone_from_slice(digest);
        let public_key = recoverable
            .recover_verifying_key_from_digest_bytes(&digest)
            .map_err(|_| Error::RecoveryFailed)?;
        Ok(Address::from_verifying_key(&public_key))
    }
}

impl From<recoverable::Signature> for Signature {
    fn from(value: recoverable::Signature) -> Self {
        let bytes = value.as_ref();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|e| Error::MalformedSignature(e.to_string()))?;
        Signature::from_bytes(&bytes)
    }
}

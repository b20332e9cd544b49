//! Canonical encoding and hashing of personal messages.
//!
//! Wallets sign a personal message by hashing the payload behind a
//! fixed prefix and the decimal length of the payload, so a signature
//! over a message can never be replayed as a signature over a
//! transaction.
//!
//! SEE: https://eips.ethereum.org/EIPS/eip-191
use sha3::{Digest, Keccak256};

/// Prefix for personal messages.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Bytes of a message that are subjected to the signing hash.
///
/// This is the UTF-8 encoding of the message without any trimming
/// or normalization.
pub fn canonical_payload(message: &str) -> &[u8] {
    message.as_bytes()
}

/// Encode the canonical payload of a message as `0x` prefixed hex,
/// the form expected by the `personal_sign` method.
pub fn encode_payload(message: &str) -> String {
    format!("0x{}", hex::encode(canonical_payload(message)))
}

/// Build the prefixed message for a payload.
pub fn prefixed_message(payload: impl AsRef<[u8]>) -> Vec<u8> {
    let payload = payload.as_ref();
    let length = payload.len().to_string();
    let mut buffer = Vec::with_capacity(
        PERSONAL_MESSAGE_PREFIX.len() + length.len() + payload.len(),
    );
    buffer.extend_from_slice(PERSONAL_MESSAGE_PREFIX.as_bytes());
    buffer.extend_from_slice(length.as_bytes());
    buffer.extend_from_slice(payload);
    buffer
}

/// Compute the digest that is signed for a payload.
pub fn hash_message(payload: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(prefixed_message(payload)).into()
}

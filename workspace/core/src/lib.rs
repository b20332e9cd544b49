//! Signing and verification of personal messages.
//!
//! A personal message is hashed behind a domain separation prefix,
//! signed by an external wallet and later verified by recovering the
//! signer address from the signature and comparing it to the address
//! claimed by the caller.
mod address;
mod error;
mod message;
mod signature;
mod verify;

pub use address::Address;
pub use error::{Error, ErrorKind};
pub use message::{
    canonical_payload, encode_payload, hash_message, prefixed_message,
    PERSONAL_MESSAGE_PREFIX,
};
pub use signature::{Signature, SIGNATURE_LENGTH};
pub use verify::{
    recover_address, verify, verify_request, Verification, VerifyRequest,
    VerifyResponse,
};

pub type Result<T> = std::result::Result<T, error::Error>;

mod client;
mod error;
mod rpc;
mod signer;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use client::VerifyClient;
pub use error::Error;
pub use rpc::{JsonRpcSigner, USER_REJECTED};
pub use signer::{sign_message, tamper_signature, ExternalSigner, SignedMessage};

//! Sign personal messages with an external wallet and verify
//! the signer.
mod error;

pub use error::Error;

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;

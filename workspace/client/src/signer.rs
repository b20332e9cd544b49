//! Adapter for an external signing authority.
//!
//! Private keys never enter this crate, signing is delegated to a
//! wallet that exposes account discovery and the `personal_sign`
//! capability.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sigverify_core::{encode_payload, Address, VerifyRequest};

use crate::{Error, Result};

/// Capabilities of an external signing authority.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Determine if the signing authority can be reached.
    async fn is_available(&self) -> bool;

    /// Request the accounts the signing authority will sign for.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Sign a hex-encoded payload as a personal message for an
    /// account and return the hex-encoded signature.
    ///
    /// Completes when the user approves or rejects the request,
    /// there is no timeout.
    async fn personal_sign(
        &self,
        payload: &str,
        account: &Address,
    ) -> Result<String>;
}

/// Message signed by an external signing authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedMessage {
    /// The message.
    pub message: String,
    /// Hex-encoded signature returned by the signer.
    pub signature: String,
    /// Account that produced the signature.
    pub address: Address,
}

impl From<SignedMessage> for VerifyRequest {
    fn from(value: SignedMessage) -> Self {
        VerifyRequest::new(
            value.message,
            value.signature,
            value.address.to_string(),
        )
    }
}

/// Sign a message using the first account of a signing authority.
pub async fn sign_message<S>(signer: &S, message: &str) -> Result<SignedMessage>
where
    S: ExternalSigner + ?Sized,
{
    if message.is_empty() {
        return Err(Error::EmptyMessage);
    }

    if !signer.is_available().await {
        return Err(Error::SignerUnavailable);
    }

    let account = signer
        .request_accounts()
        .await?
        .into_iter()
        .next()
        .ok_or(Error::SignerUnavailable)?;

    let payload = encode_payload(message);

    tracing::debug!(
        account = %account,
        length = message.len(),
        "personal sign");

    let signature = signer.personal_sign(&payload, &account).await?;

    Ok(SignedMessage {
        message: message.to_owned(),
        signature,
        address: account,
    })
}

/// Overwrite the trailing five digits of a signature with zeros.
///
/// Used to demonstrate that verification detects tampering.
pub fn tamper_signature(signature: &str) -> String {
    let count = signature.chars().count();
    let mut tampered: String =
        signature.chars().take(count.saturating_sub(5)).collect();
    tampered.push_str("00000");
    tampered
}

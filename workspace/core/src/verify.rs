//! Verification of a signed message against a claimed signer.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    canonical_payload, hash_message, Address, Error, Result, Signature,
};

/// Request to verify a signed message.
///
/// Fields accept any JSON value so that absent, empty or mistyped
/// fields are reported by [VerifyRequest::validate] rather than by
/// the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// The message that was signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// Hex-encoded signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Value>,
    /// Address claimed to have produced the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
}

/// Determine if a field carries a value.
///
/// Absent, `null`, `false`, zero and the empty string do not.
fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|value| match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Text of a field that must be a string to be hashed or parsed.
fn text<'a>(field: &'static str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        Error::MalformedSignature(format!("{} is not a string", field))
    })
}

impl VerifyRequest {
    /// Create a request with all fields present.
    pub fn new(
        message: impl Into<String>,
        signature: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            signature: Some(Value::String(signature.into())),
            address: Some(Value::String(address.into())),
        }
    }

    /// Decode a request from a JSON body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Ensure all fields are present and that the message and
    /// signature are text.
    ///
    /// The claimed address is returned as given, it is only
    /// interpreted once a signer has been recovered.
    pub fn validate(&self) -> Result<(&str, &str, &Value)> {
        let message = present(&self.message);
        let signature = present(&self.signature);
        let address = present(&self.address);

        match (message, signature, address) {
            (Some(message), Some(signature), Some(address)) => Ok((
                text("message", message)?,
                text("signature", signature)?,
                address,
            )),
            _ => {
                let mut missing = Vec::new();
                if message.is_none() {
                    missing.push("message");
                }
                if signature.is_none() {
                    missing.push("signature");
                }
                if address.is_none() {
                    missing.push("address");
                }
                Err(Error::MissingField(missing))
            }
        }
    }
}

/// Outcome of comparing a recovered signer to a claimed signer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Verification {
    /// Whether the recovered address matches the claim.
    pub valid: bool,
    /// Address recovered from the signature.
    pub recovered_address: Address,
    /// Address claimed by the caller, verbatim.
    pub claimed_address: String,
}

/// Response for a verification request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Whether the signature was produced by the claimed address.
    pub valid: bool,
    /// Address recovered from the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovered_address: Option<String>,
    /// Address provided in the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_address: Option<String>,
    /// Reason the request could not be verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyResponse {
    /// Response for a request that could not be verified.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            recovered_address: None,
            provided_address: None,
            error: Some(message.into()),
        }
    }
}

impl From<Verification> for VerifyResponse {
    fn from(value: Verification) -> Self {
        Self {
            valid: value.valid,
            recovered_address: Some(value.recovered_address.to_string()),
            provided_address: Some(value.claimed_address),
            error: None,
        }
    }
}

/// Recover the address that signed a message.
pub fn recover_address(message: &str, signature: &str) -> Result<Address> {
    let signature: Signature = signature.parse()?;
    let digest = hash_message(canonical_payload(message));
    signature.recover(&digest)
}

/// Verify that a signature over a message was produced by the
/// claimed address.
pub fn verify(
    message: &str,
    signature: &str,
    claimed_address: &str,
) -> Result<Verification> {
    let recovered_address = recover_address(message, signature)?;
    Ok(Verification {
        valid: recovered_address.matches(claimed_address),
        recovered_address,
        claimed_address: claimed_address.to_owned(),
    })
}

/// Validate and verify a request.
pub fn verify_request(request: &VerifyRequest) -> Result<Verification> {
    let (message, signature, address) = request.validate()?;
    let recovered_address = recover_address(message, signature)?;
    let claimed_address = address
        .as_str()
        .ok_or_else(|| Error::InvalidAddress(address.to_string()))?;
    Ok(Verification {
        valid: recovered_address.matches(claimed_address),
        recovered_address,
        claimed_address: claimed_address.to_owned(),
    })
}

use thiserror::Error;

/// Broad classification of an error.
///
/// Client errors are caused by the input and are safe to report back
/// to the caller, internal errors are not.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// The input was missing or could not be interpreted.
    Client,
    /// Unexpected failure unrelated to the input.
    Internal,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingField(Vec<&'static str>),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature does not recover a public key")]
    RecoveryFailed,

    #[error("invalid address {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::MalformedSignature(_)
            | Self::RecoveryFailed
            | Self::InvalidAddress(_) => ErrorKind::Client,
            Self::Json(_) => ErrorKind::Internal,
        }
    }
}

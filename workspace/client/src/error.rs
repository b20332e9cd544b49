use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("message to sign is empty")]
    EmptyMessage,

    #[error("no signing authority is available")]
    SignerUnavailable,

    #[error("signing request was rejected")]
    UserRejected,

    #[error("signer error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("signer response has no result")]
    RpcResult,

    #[error("unexpected response status code {0}")]
    ResponseCode(u16),

    #[error("verification failed with status {status}: {message}")]
    Verification { status: u16, message: String },

    #[error(transparent)]
    Core(#[from] sigverify_core::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

use axum::{body::Bytes, http::StatusCode, Json};

use sigverify_core::{verify_request, Error, VerifyRequest, VerifyResponse};

const MISSING_FIELDS: &str = "Missing required fields";
const INVALID_SIGNATURE: &str = "Invalid signature format";
const SERVER_ERROR: &str = "Server error";

pub(crate) struct VerifyHandler;

impl VerifyHandler {
    /// Verify a signed message against a claimed address.
    pub(crate) async fn post(body: Bytes) -> (StatusCode, Json<VerifyResponse>) {
        let result = VerifyRequest::from_slice(&body)
            .and_then(|request| verify_request(&request));

        match result {
            Ok(verification) => {
                tracing::debug!(
                    valid = verification.valid,
                    recovered = %verification.recovered_address,
                    claimed = %verification.claimed_address,
                    "verify");
                (StatusCode::OK, Json(verification.into()))
            }
            Err(e) => VerifyHandler::error(e),
        }
    }

    /// Map an error to a response, only client errors carry
    /// detail back to the caller.
    fn error(e: Error) -> (StatusCode, Json<VerifyResponse>) {
        match e {
            Error::MissingField(fields) => {
                tracing::debug!(fields = ?fields, "missing fields");
                (
                    StatusCode::BAD_REQUEST,
                    Json(VerifyResponse::error(MISSING_FIELDS)),
                )
            }
            Error::MalformedSignature(_) | Error::RecoveryFailed => {
                tracing::debug!(error = %e, "invalid signature");
                (
                    StatusCode::BAD_REQUEST,
                    Json(VerifyResponse::error(INVALID_SIGNATURE)),
                )
            }
            _ => {
                tracing::error!(kind = ?e.kind(), "verify failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(VerifyResponse::error(SERVER_ERROR)),
                )
            }
        }
    }
}

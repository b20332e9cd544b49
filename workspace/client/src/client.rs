use reqwest::Client;
use url::Url;

use sigverify_core::{VerifyRequest, VerifyResponse};

use crate::{Error, Result};

/// Client for the verification server.
pub struct VerifyClient;

impl VerifyClient {
    /// Ask the server to verify a signed message.
    pub async fn verify(
        server: Url,
        request: &VerifyRequest,
    ) -> Result<VerifyResponse> {
        let client = Client::new();
        let url = server.join("api/verify")?;

        let response = client.post(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error = response
                .json::<VerifyResponse>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(match error {
                Some(message) => Error::Verification {
                    status: status.into(),
                    message,
                },
                None => Error::ResponseCode(status.into()),
            });
        }

        let doc: VerifyResponse = response.json().await?;
        Ok(doc)
    }
}

//! Signing authority reached over JSON-RPC.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use sigverify_core::Address;

use crate::{Error, ExternalSigner, Result};

/// Error code for a request the user rejected.
///
/// SEE: https://eips.ethereum.org/EIPS/eip-1193#provider-errors
pub const USER_REJECTED: i64 = 4001;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Signer that forwards requests to a JSON-RPC endpoint such as a
/// wallet bridge or development node.
pub struct JsonRpcSigner {
    client: Client,
    url: Url,
}

impl JsonRpcSigner {
    /// Create a signer for an endpoint.
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(url = %self.url, "signer unreachable: {}", e);
                Error::SignerUnavailable
            })?;

        if !response.status().is_success() {
            return Err(Error::ResponseCode(response.status().into()));
        }

        let body: RpcResponse = response.json().await?;
        if let Some(error) = body.error {
            tracing::debug!(
                method = %method,
                code = error.code,
                "signer error: {}", error.message);
            return Err(if error.code == USER_REJECTED {
                Error::UserRejected
            } else {
                Error::Rpc {
                    code: error.code,
                    message: error.message,
                }
            });
        }

        let result = body.result.ok_or(Error::RpcResult)?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl ExternalSigner for JsonRpcSigner {
    async fn is_available(&self) -> bool {
        match self.call::<Vec<Address>>("eth_accounts", json!([])).await {
            Ok(_) | Err(Error::UserRejected) | Err(Error::Rpc { .. }) => true,
            Err(_) => false,
        }
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.call("eth_requestAccounts", json!([])).await
    }

    async fn personal_sign(
        &self,
        payload: &str,
        account: &Address,
    ) -> Result<String> {
        self.call("personal_sign", json!([payload, account.to_lowercase_hex()]))
            .await
    }
}

use anyhow::Result;
use axum::{extract::Extension, routing::post, Json, Router};
use axum_server::Handle;
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc, thread};
use tokio::sync::oneshot;
use url::Url;

use k256::ecdsa::{recoverable, signature::Signer, SigningKey};

use sigverify_client::USER_REJECTED;
use sigverify_core::{canonical_payload, prefixed_message, Address, Signature};
use sigverify_server::{Server, ServerConfig, ServerInfo, State};

const ADDR: &str = "127.0.0.1:9009";
const SERVER: &str = "http://localhost:9009";

struct MockServer {
    handle: Handle,
}

impl MockServer {
    fn new() -> Result<Self> {
        Ok(Self {
            handle: Handle::new(),
        })
    }

    async fn start(&self, config: ServerConfig) -> Result<()> {
        let addr: SocketAddr = ADDR.parse::<SocketAddr>()?;

        tracing::info!("start mock server {:#?}", addr);

        let state = Arc::new(State {
            config,
            info: ServerInfo {
                name: String::from("integration-test"),
                version: String::from("0.0.0"),
            },
        });

        let server = Server::new();
        server.start(addr, state, self.handle.clone()).await?;
        Ok(())
    }

    /// Run the mock server in a separate thread.
    fn spawn(
        tx: oneshot::Sender<SocketAddr>,
        config: ServerConfig,
    ) -> Result<ShutdownHandle> {
        let server = MockServer::new()?;
        let listen_handle = server.handle.clone();
        let user_handle = server.handle.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                if let Some(addr) = listen_handle.listening().await {
                    tracing::info!("server has started {:#?}", addr);
                    tx.send(addr)
                        .expect("failed to send listening notification");
                }
            });
        });

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async {
                server.start(config).await.expect("failed to start server");
            });
        });

        Ok(ShutdownHandle(user_handle))
    }
}

/// Ensure the server is shutdown when the handle is dropped.
pub struct ShutdownHandle(Handle);

impl Drop for ShutdownHandle {
    fn drop(&mut self) {
        tracing::info!("shutdown mock server");
        self.0.shutdown();
    }
}

pub fn default_server_config() -> ServerConfig {
    Default::default()
}

pub fn spawn(
    config: ServerConfig,
) -> Result<(oneshot::Receiver<SocketAddr>, ShutdownHandle)> {
    let (tx, rx) = oneshot::channel::<SocketAddr>();
    let handle = MockServer::spawn(tx, config)?;
    Ok((rx, handle))
}

pub fn server() -> Url {
    Url::parse(SERVER).expect("failed to parse server URL")
}

pub fn new_signing_key() -> (SigningKey, Address) {
    let signing_key = SigningKey::random(&mut rand::thread_rng());
    let address = Address::from_verifying_key(&signing_key.verifying_key());
    (signing_key, address)
}

/// Sign a message the way a browser wallet does.
pub fn sign_personal(signing_key: &SigningKey, payload: &[u8]) -> String {
    let signature: recoverable::Signature =
        signing_key.sign(&prefixed_message(payload));
    Signature::from(signature).to_string()
}

pub fn sign_text(signing_key: &SigningKey, message: &str) -> String {
    sign_personal(signing_key, canonical_payload(message))
}

/// Wallet answering JSON-RPC requests with a single key.
pub struct MockWallet {
    signing_key: SigningKey,
    address: Address,
    reject: bool,
}

impl MockWallet {
    pub fn new(reject: bool) -> Self {
        let (signing_key, address) = new_signing_key();
        Self {
            signing_key,
            address,
            reject,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn personal_sign(&self, params: &Value) -> Result<Value, (i64, String)> {
        let payload = params[0].as_str().unwrap_or_default();
        let account = params[1].as_str().unwrap_or_default();

        if !self.address.matches(account) {
            return Err((-32602, format!("unknown account {}", account)));
        }

        if self.reject {
            return Err((
                USER_REJECTED,
                "User rejected the request.".to_owned(),
            ));
        }

        let payload = payload.strip_prefix("0x").unwrap_or(payload);
        let payload = hex::decode(payload)
            .map_err(|e| (-32602i64, e.to_string()))?;
        Ok(json!(sign_personal(&self.signing_key, &payload)))
    }
}

async fn wallet_rpc(
    Extension(wallet): Extension<Arc<MockWallet>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    let id = request["id"].clone();
    let outcome = match request["method"].as_str().unwrap_or_default() {
        "eth_accounts" | "eth_requestAccounts" => {
            Ok(json!([wallet.address.to_lowercase_hex()]))
        }
        "personal_sign" => wallet.personal_sign(&request["params"]),
        method => Err((-32601, format!("method {} not found", method))),
    };

    Json(match outcome {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": code, "message": message},
        }),
    })
}

/// Spawn a JSON-RPC wallet on an ephemeral port.
pub fn spawn_wallet(wallet: MockWallet) -> Result<Url> {
    let app = Router::new()
        .route("/", post(wallet_rpc))
        .layer(Extension(Arc::new(wallet)));
    let addr: SocketAddr = "127.0.0.1:0".parse()?;
    let server =
        axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    let url = Url::parse(&format!("http://{}/", server.local_addr()))?;
    tokio::spawn(server);
    Ok(url)
}

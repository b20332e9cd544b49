use anyhow::Result;
use serial_test::serial;
use serde_json::{json, Value};

use crate::test_utils::*;

use sigverify_client::{Error, VerifyClient};
use sigverify_core::VerifyRequest;

fn assert_rejected(
    result: sigverify_client::Result<sigverify_core::VerifyResponse>,
    expected_status: u16,
    expected_message: &str,
) {
    match result {
        Err(Error::Verification { status, message }) => {
            assert_eq!(expected_status, status);
            assert_eq!(expected_message, message);
        }
        other => panic!("unexpected verification result {:?}", other),
    }
}

#[tokio::test]
#[serial]
async fn integration_verify_missing_fields() -> Result<()> {
    let (rx, _handle) = spawn(default_server_config())?;
    let _ = rx.await?;

    let (signing_key, address) = new_signing_key();
    let signature = sign_text(&signing_key, "hello world");

    let requests = [
        VerifyRequest {
            message: None,
            signature: Some(json!(signature)),
            address: Some(json!(address.to_string())),
        },
        VerifyRequest {
            message: Some(json!("hello world")),
            signature: None,
            address: Some(json!(address.to_string())),
        },
        VerifyRequest {
            message: Some(json!("hello world")),
            signature: Some(json!(signature)),
            address: None,
        },
        VerifyRequest::new("", signature.clone(), address.to_string()),
    ];

    for request in requests {
        let result = VerifyClient::verify(server(), &request).await;
        assert_rejected(result, 400, "Missing required fields");
    }

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_verify_malformed_signature() -> Result<()> {
    let (rx, _handle) = spawn(default_server_config())?;
    let _ = rx.await?;

    let (signing_key, address) = new_signing_key();
    let signature = sign_text(&signing_key, "hello world");

    let malformed = [
        signature[..signature.len() - 2].to_owned(),
        format!("{}00", signature),
        "not a signature".to_owned(),
        "0x".to_owned(),
    ];

    for signature in malformed {
        let request = VerifyRequest::new(
            "hello world",
            signature,
            address.to_string(),
        );
        let result = VerifyClient::verify(server(), &request).await;
        assert_rejected(result, 400, "Invalid signature format");
    }

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_verify_bad_body() -> Result<()> {
    let (rx, _handle) = spawn(default_server_config())?;
    let _ = rx.await?;

    let url = server().join("api/verify")?;
    let response = reqwest::Client::new()
        .post(url)
        .body("message=hello")
        .send()
        .await?;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await?;
    assert_eq!(json!({"valid": false, "error": "Server error"}), body);

    Ok(())
}

#[tokio::test]
#[serial]
async fn integration_verify_body_too_large() -> Result<()> {
    let mut config = default_server_config();
    config.verifier.body_limit = 256;

    let (rx, _handle) = spawn(config)?;
    let _ = rx.await?;

    let (signing_key, address) = new_signing_key();
    let message = "a".repeat(1024);
    let signature = sign_text(&signing_key, &message);

    let request = VerifyRequest::new(message, signature, address.to_string());
    let result = VerifyClient::verify(server(), &request).await;

    assert!(matches!(result, Err(Error::ResponseCode(413))));

    Ok(())
}

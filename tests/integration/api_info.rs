use anyhow::Result;
use serial_test::serial;
use serde_json::Value;

use crate::test_utils::*;

#[tokio::test]
#[serial]
async fn integration_api_info() -> Result<()> {
    let (rx, _handle) = spawn(default_server_config())?;
    let _ = rx.await?;

    let url = server().join("api")?;
    let body: Value = reqwest::get(url).await?.json().await?;

    assert_eq!("integration-test", body["name"]);
    assert_eq!("0.0.0", body["version"]);

    Ok(())
}

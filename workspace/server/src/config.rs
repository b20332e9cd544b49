use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Verification endpoint configuration.
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Configuration for TLS encryption.
    pub tls: Option<TlsConfig>,

    /// Configuration for CORS.
    pub cors: Option<CorsConfig>,

    /// Path the file was loaded from used to determine
    /// relative paths.
    #[serde(skip)]
    file: Option<PathBuf>,
}

impl ServerConfig {
    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Err(Error::NotFile(path.as_ref().to_path_buf()));
        }

        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut config: ServerConfig = toml::from_str(&contents)?;
        config.file = Some(path.as_ref().canonicalize()?);

        if config.verifier.body_limit == 0 {
            return Err(Error::ZeroBodyLimit);
        }

        let dir = config.directory();

        if let Some(tls) = config.tls.as_mut() {
            if tls.cert.is_relative() {
                tls.cert = dir.join(&tls.cert);
            }
            if tls.key.is_relative() {
                tls.key = dir.join(&tls.key);
            }

            tls.cert = tls.cert.canonicalize()?;
            tls.key = tls.key.canonicalize()?;
        }

        Ok(config)
    }

    /// Parent directory of the configuration file.
    fn directory(&self) -> PathBuf {
        self.file
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }
}

fn default_body_limit() -> usize {
    1024 * 64
}

#[derive(Debug, Deserialize)]
pub struct VerifierConfig {
    /// Maximum size of request bodies.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            body_limit: default_body_limit(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TlsConfig {
    /// Path to the certificate.
    pub cert: PathBuf,
    /// Path to the certificate key file.
    pub key: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct CorsConfig {
    /// List of allowed CORS origins for the server.
    pub origins: Vec<Url>,
}

//! # Service Configuration
//!
//! Read once at startup from the process environment (after `.env` has
//! been loaded by the binary).
//!
//! | Variable                         | Default                 |
//! |----------------------------------|-------------------------|
//! | `PORT`                           | `3001`                  |
//! | `APP_ENV`                        | `development`           |
//! | `FRONTEND_URL`                   | `http://localhost:5173` |
//! | `APPLE_WWDR_CERTIFICATE_PATH`    | unset                   |
//! | `APPLE_SIGNER_CERTIFICATE_PATH`  | unset                   |
//! | `APPLE_SIGNER_KEY_PATH`          | unset                   |
//! | `APPLE_SIGNER_KEY_PASSPHRASE`    | unset                   |
//!
//! Signing is enabled only when all three path variables are set. Without
//! them, downloads degrade to unsigned pass JSON.

use std::path::PathBuf;

use thiserror::Error;
use wpc_bundle::CertificatePaths;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Deployment environment name, reported by `/health`.
    pub environment: String,
    /// Origin allowed by CORS (with credentials).
    pub frontend_url: String,
    /// Signing material locations. `None` means signing is not configured.
    pub certificates: Option<CertificatePaths>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("frontend_url", &self.frontend_url)
            // CertificatePaths redacts the passphrase itself.
            .field("certificates", &self.certificates)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            certificates: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let certificates = match (
            get("APPLE_WWDR_CERTIFICATE_PATH"),
            get("APPLE_SIGNER_CERTIFICATE_PATH"),
            get("APPLE_SIGNER_KEY_PATH"),
        ) {
            (Some(wwdr), Some(cert), Some(key)) => Some(CertificatePaths {
                wwdr_certificate: PathBuf::from(wwdr),
                signer_certificate: PathBuf::from(cert),
                signer_key: PathBuf::from(key),
                signer_key_passphrase: get("APPLE_SIGNER_KEY_PASSPHRASE"),
            }),
            _ => None,
        };

        Ok(Self {
            port,
            environment: get("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            certificates,
        })
    }

    /// Whether downloads produce signed bundles.
    pub fn signing_enabled(&self) -> bool {
        self.certificates.is_some()
    }
}

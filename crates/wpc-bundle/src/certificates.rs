//! # Signing Certificates
//!
//! Locating and loading the PEM material used to sign pass bundles: the
//! Apple WWDR intermediate certificate, the pass type signer certificate and
//! its private key (optionally passphrase protected).

use std::fmt;
use std::path::{Path, PathBuf};

use openssl::pkey::{PKey, Private};
use openssl::x509::X509;

use crate::error::BundleError;

/// Where to find the signing material. Relative paths are resolved against
/// a base directory, normally the process working directory.
#[derive(Clone)]
pub struct CertificatePaths {
    pub wwdr_certificate: PathBuf,
    pub signer_certificate: PathBuf,
    pub signer_key: PathBuf,
    pub signer_key_passphrase: Option<String>,
}

impl fmt::Debug for CertificatePaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificatePaths")
            .field("wwdr_certificate", &self.wwdr_certificate)
            .field("signer_certificate", &self.signer_certificate)
            .field("signer_key", &self.signer_key)
            .field(
                "signer_key_passphrase",
                &self.signer_key_passphrase.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl CertificatePaths {
    /// Resolve relative paths against `base`.
    pub fn resolved_against(&self, base: &Path) -> Self {
        Self {
            wwdr_certificate: resolve(base, &self.wwdr_certificate),
            signer_certificate: resolve(base, &self.signer_certificate),
            signer_key: resolve(base, &self.signer_key),
            signer_key_passphrase: self.signer_key_passphrase.clone(),
        }
    }
}

/// Parsed signing material.
#[derive(Clone)]
pub struct SigningCertificates {
    pub(crate) wwdr: X509,
    pub(crate) signer: X509,
    pub(crate) key: PKey<Private>,
}

impl fmt::Debug for SigningCertificates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCertificates")
            .field("key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn read(kind: &'static str, path: &Path) -> Result<Vec<u8>, BundleError> {
    std::fs::read(path).map_err(|source| BundleError::ReadCertificate {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

impl SigningCertificates {
    /// Read and parse the PEM files named by `paths`.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn load(paths: &CertificatePaths) -> Result<Self, BundleError> {
        let base = std::env::current_dir()?;
        let paths = paths.resolved_against(&base);

        let wwdr = read("WWDR certificate", &paths.wwdr_certificate)?;
        let signer = read("signer certificate", &paths.signer_certificate)?;
        let key = read("signer key", &paths.signer_key)?;

        Self::from_pem(&wwdr, &signer, &key, paths.signer_key_passphrase.as_deref())
    }

    /// Parse PEM-encoded signing material.
    pub fn from_pem(
        wwdr: &[u8],
        signer: &[u8],
        key: &[u8],
        passphrase: Option<&str>,
    ) -> Result<Self, BundleError> {
        let wwdr = X509::from_pem(wwdr).map_err(|source| BundleError::ParseCertificate {
            kind: "WWDR certificate",
            source,
        })?;
        let signer = X509::from_pem(signer).map_err(|source| BundleError::ParseCertificate {
            kind: "signer certificate",
            source,
        })?;
        let key = match passphrase.filter(|p| !p.is_empty()) {
            Some(p) => PKey::private_key_from_pem_passphrase(key, p.as_bytes()),
            None => PKey::private_key_from_pem(key),
        }
        .map_err(|source| BundleError::ParseCertificate {
            kind: "signer key",
            source,
        })?;

        Ok(Self { wwdr, signer, key })
    }
}

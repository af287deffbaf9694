//! # Bundle Producer
//!
//! Turns a [`PassRecord`] into a signed `.pkpass` archive:
//!
//! ```text
//! pass.json       the pass document
//! <slot>.png      every supplied image
//! manifest.json   { "<file>": "<sha1 hex>" } for every file above
//! signature       detached DER PKCS#7 over manifest.json
//! ```
//!
//! Signing is delegated to OpenSSL. The producer performs blocking file and
//! CPU work; async callers run it on the blocking pool.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use openssl::pkcs7::{Pkcs7, Pkcs7Flags};
use openssl::stack::Stack;
use sha1::{Digest, Sha1};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::assembler::PassRecord;
use crate::certificates::SigningCertificates;
use crate::error::BundleError;

/// MIME type of a pass bundle.
pub const PKPASS_CONTENT_TYPE: &str = "application/vnd.apple.pkpass";

pub const PASS_JSON: &str = "pass.json";
pub const MANIFEST_JSON: &str = "manifest.json";
pub const SIGNATURE: &str = "signature";

/// Produces the downloadable bytes for an assembled pass.
pub trait BundleProducer: Send + Sync {
    fn produce(&self, record: &PassRecord) -> Result<Vec<u8>, BundleError>;
}

/// Hex-encoded SHA-1 of `bytes`.
pub fn sha1_hex(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

/// Signs with PKCS#7 and packages as a zip archive.
#[derive(Debug, Clone)]
pub struct PkPassProducer {
    certificates: SigningCertificates,
}

impl PkPassProducer {
    pub fn new(certificates: SigningCertificates) -> Self {
        Self { certificates }
    }

    /// Detached DER signature over `manifest`, carrying the WWDR certificate.
    fn sign(&self, manifest: &[u8]) -> Result<Vec<u8>, BundleError> {
        let certs = &self.certificates;
        let mut chain = Stack::new().map_err(BundleError::Signing)?;
        chain.push(certs.wwdr.clone()).map_err(BundleError::Signing)?;

        Pkcs7::sign(
            &certs.signer,
            &certs.key,
            &chain,
            manifest,
            Pkcs7Flags::BINARY | Pkcs7Flags::DETACHED,
        )
        .and_then(|p| p.to_der())
        .map_err(BundleError::Signing)
    }
}

/// Collect the unsigned bundle entries in write order.
fn entries(record: &PassRecord) -> Result<Vec<(String, Vec<u8>)>, BundleError> {
    let pass_json = serde_json::to_vec_pretty(&record.pass).map_err(|source| {
        BundleError::Serialize {
            file: PASS_JSON,
            source,
        }
    })?;

    let mut files = vec![(PASS_JSON.to_string(), pass_json)];
    for image in &record.images {
        let name = image.file_name();
        if files.iter().any(|(existing, _)| *existing == name) {
            return Err(BundleError::DuplicateEntry(name));
        }
        files.push((name, image.bytes.clone()));
    }
    Ok(files)
}

/// `manifest.json` contents for the given entries.
pub fn manifest(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, BundleError> {
    let hashes: BTreeMap<&str, String> = files
        .iter()
        .map(|(name, bytes)| (name.as_str(), sha1_hex(bytes)))
        .collect();
    serde_json::to_vec_pretty(&hashes).map_err(|source| BundleError::Serialize {
        file: MANIFEST_JSON,
        source,
    })
}

impl BundleProducer for PkPassProducer {
    fn produce(&self, record: &PassRecord) -> Result<Vec<u8>, BundleError> {
        let mut files = entries(record)?;
        let manifest = manifest(&files)?;
        let signature = self.sign(&manifest)?;
        files.push((MANIFEST_JSON.to_string(), manifest));
        files.push((SIGNATURE.to_string(), signature));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in &files {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(bytes)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

//! Error types for assembly and bundling.

use std::path::PathBuf;

use thiserror::Error;
use wpc_core::{Bucket, FieldError, ImageSlot, PassType};

/// The assembler was handed data that should not have passed validation.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("required key `{0}` is missing")]
    MissingKey(&'static str),

    #[error("{bucket} field {index}: {source}")]
    InvalidField {
        bucket: Bucket,
        index: usize,
        #[source]
        source: FieldError,
    },

    #[error("{bucket} contains duplicate key `{key}`")]
    DuplicateKey { bucket: Bucket, key: String },

    #[error("pass is tagged {expected} but carries a {found} structure")]
    StyleMismatch { expected: PassType, found: PassType },

    #[error("{slot} image is not valid base64: {source}")]
    ImageDecode {
        slot: ImageSlot,
        #[source]
        source: base64::DecodeError,
    },
}

/// Failure to sign or package a pass bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("failed to read {kind} from {path}: {source}")]
    ReadCertificate {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind}: {source}")]
    ParseCertificate {
        kind: &'static str,
        #[source]
        source: openssl::error::ErrorStack,
    },

    #[error("PKCS#7 signing failed: {0}")]
    Signing(#[source] openssl::error::ErrorStack),

    #[error("failed to serialize {file}: {source}")]
    Serialize {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate bundle entry `{0}`")]
    DuplicateEntry(String),

    #[error("zip archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error while writing archive: {0}")]
    Io(#[from] std::io::Error),
}

//! # wpc-cli — Command-Line Tool for the Wallet Pass Creator
//!
//! Offline access to the same pipeline the HTTP service runs:
//!
//! - `wpc validate`: check a pass request and print every violation.
//! - `wpc bundle`: validate, assemble and sign a `.pkpass` to disk.
//! - `wpc serial`: print a freshly generated serial number.
//! - `wpc qrcode`: render a QR preview as PNG or SVG.
//!
//! ```bash
//! wpc validate ticket.json
//! wpc bundle ticket.json --out ticket.pkpass
//! wpc qrcode "EVT-001" --format svg --out preview.svg
//! ```
//!
//! Handlers parse and print; all pass semantics live in `wpc-core`,
//! `wpc-bundle` and `wpc-render`.

pub mod bundle;
pub mod qrcode;
pub mod serial;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use wpc_core::{ImageSet, PassData, PassType};

/// Exit code for a request that parsed but failed validation.
pub const EXIT_INVALID: u8 = 2;

/// A pass request file, in the same shape the HTTP create endpoint accepts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassRequest {
    pub pass_type: PassType,
    pub pass_data: PassData,
    #[serde(default)]
    pub images: Option<ImageSet>,
}

/// Read and parse a pass request file.
pub fn read_request(path: &Path) -> Result<PassRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse pass request: {}", path.display()))
}

/// Print validation errors to stderr, one per line.
pub(crate) fn report_errors(errors: &[String]) {
    for error in errors {
        eprintln!("  - {error}");
    }
}

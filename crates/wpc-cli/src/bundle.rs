//! # Bundle Subcommand
//!
//! Builds a signed `.pkpass` from a request file: fill a blank serial,
//! validate, assemble, sign, and write the archive.
//!
//! Certificate locations come from flags or the same environment variables
//! the API service reads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use wpc_bundle::{assemble, BundleProducer, CertificatePaths, PkPassProducer, SigningCertificates};

use crate::{read_request, report_errors, EXIT_INVALID};

/// Arguments for the bundle subcommand.
#[derive(Args, Debug)]
pub struct BundleArgs {
    /// Pass request file (`{"passType", "passData", "images"}`).
    pub path: PathBuf,

    /// Output path. Defaults to `<serialNumber>.pkpass` in the current directory.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Apple WWDR intermediate certificate (PEM).
    #[arg(long, env = "APPLE_WWDR_CERTIFICATE_PATH")]
    pub wwdr_certificate: PathBuf,

    /// Pass Type ID signer certificate (PEM).
    #[arg(long, env = "APPLE_SIGNER_CERTIFICATE_PATH")]
    pub signer_certificate: PathBuf,

    /// Signer private key (PEM).
    #[arg(long, env = "APPLE_SIGNER_KEY_PATH")]
    pub signer_key: PathBuf,

    /// Passphrase for an encrypted signer key.
    #[arg(long, env = "APPLE_SIGNER_KEY_PASSPHRASE", hide_env_values = true)]
    pub signer_key_passphrase: Option<String>,
}

impl BundleArgs {
    fn certificate_paths(&self) -> CertificatePaths {
        CertificatePaths {
            wwdr_certificate: self.wwdr_certificate.clone(),
            signer_certificate: self.signer_certificate.clone(),
            signer_key: self.signer_key.clone(),
            signer_key_passphrase: self.signer_key_passphrase.clone(),
        }
    }
}

/// Execute the bundle subcommand.
pub fn run_bundle(args: &BundleArgs) -> Result<u8> {
    let mut request = read_request(&args.path)?;
    let serial = request
        .pass_data
        .ensure_serial_number(wpc_core::serial::generate)
        .to_string();

    if let Err(errors) = wpc_core::validate(&request.pass_data).into_result() {
        eprintln!("FAIL: {}", args.path.display());
        report_errors(&errors);
        return Ok(EXIT_INVALID);
    }

    let record = assemble(&request.pass_data, request.pass_type, request.images.as_ref())
        .context("failed to assemble pass")?;
    let certificates = SigningCertificates::load(&args.certificate_paths())
        .context("failed to load signing certificates")?;
    let bytes = PkPassProducer::new(certificates)
        .produce(&record)
        .context("failed to produce pass bundle")?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{serial}.pkpass")));
    std::fs::write(&out, &bytes)
        .with_context(|| format!("failed to write bundle: {}", out.display()))?;

    tracing::info!(%serial, bytes = bytes.len(), "pass bundle written");
    println!("{}", out.display());
    Ok(0)
}

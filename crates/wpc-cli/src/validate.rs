//! # Validate Subcommand
//!
//! Runs the pass validator over a request file without storing anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{read_request, report_errors, EXIT_INVALID};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Pass request file (`{"passType", "passData", "images"}`).
    pub path: PathBuf,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand. Exits with [`EXIT_INVALID`] when the
/// pass has any violation.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let request = read_request(&args.path)?;
    let report = wpc_core::validate(&request.pass_data);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.valid {
        println!("OK: {} ({})", args.path.display(), request.pass_type);
    } else {
        eprintln!("FAIL: {}", args.path.display());
        report_errors(&report.errors);
    }

    Ok(if report.valid { 0 } else { EXIT_INVALID })
}

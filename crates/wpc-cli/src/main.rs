//! # wpc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wpc_cli::bundle::{run_bundle, BundleArgs};
use wpc_cli::qrcode::{run_qrcode, QrCodeArgs};
use wpc_cli::serial::{run_serial, SerialArgs};
use wpc_cli::validate::{run_validate, ValidateArgs};

/// Wallet Pass Creator CLI.
///
/// Validates pass requests, builds signed `.pkpass` bundles, and renders
/// QR previews without running the API service.
#[derive(Parser, Debug)]
#[command(name = "wpc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a pass request and list every violation.
    Validate(ValidateArgs),

    /// Build a signed .pkpass bundle from a pass request.
    Bundle(BundleArgs),

    /// Print generated serial numbers.
    Serial(SerialArgs),

    /// Render a QR code preview.
    #[command(name = "qrcode")]
    QrCode(QrCodeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Bundle(args) => run_bundle(&args),
        Commands::Serial(args) => run_serial(&args),
        Commands::QrCode(args) => run_qrcode(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use wpc_cli::qrcode::QrFormat;

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["wpc", "validate", "ticket.json", "--json"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("ticket.json"));
            assert!(args.json);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_bundle_with_flags() {
        let cli = Cli::try_parse_from([
            "wpc",
            "bundle",
            "ticket.json",
            "--out",
            "t.pkpass",
            "--wwdr-certificate",
            "wwdr.pem",
            "--signer-certificate",
            "signer.pem",
            "--signer-key",
            "signer.key",
        ])
        .unwrap();
        if let Commands::Bundle(args) = cli.command {
            assert_eq!(args.out, Some(PathBuf::from("t.pkpass")));
            assert_eq!(args.signer_key, PathBuf::from("signer.key"));
            assert!(args.signer_key_passphrase.is_none());
        } else {
            panic!("expected bundle");
        }
    }

    #[test]
    fn cli_parse_qrcode_defaults() {
        let cli = Cli::try_parse_from(["wpc", "qrcode", "EVT-1", "--out", "q.png"]).unwrap();
        if let Commands::QrCode(args) = cli.command {
            assert_eq!(args.format, QrFormat::Png);
            assert_eq!(args.size, 300);
        } else {
            panic!("expected qrcode");
        }
    }

    #[test]
    fn cli_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["wpc", "qrcode", "x", "--format", "gif", "--out", "q"]).is_err());
    }

    #[test]
    fn cli_parse_serial_count_and_verbosity() {
        let cli = Cli::try_parse_from(["wpc", "-vv", "serial", "-n", "5"]).unwrap();
        assert_eq!(cli.verbose, 2);
        if let Commands::Serial(args) = cli.command {
            assert_eq!(args.count, 5);
        } else {
            panic!("expected serial");
        }
    }
}

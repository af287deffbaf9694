//! # QR Code Subcommand
//!
//! Renders the same preview the `/api/passes/qrcode` endpoint serves.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use wpc_render::{BarcodeRenderer, ImageFormat, QrRenderer, DEFAULT_SIZE};

/// Output encoding flag.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrFormat {
    Png,
    Svg,
}

impl From<QrFormat> for ImageFormat {
    fn from(format: QrFormat) -> Self {
        match format {
            QrFormat::Png => ImageFormat::Png,
            QrFormat::Svg => ImageFormat::Svg,
        }
    }
}

/// Arguments for the qrcode subcommand.
#[derive(Args, Debug)]
pub struct QrCodeArgs {
    /// Text to encode.
    pub data: String,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = QrFormat::Png)]
    pub format: QrFormat,

    /// Edge length in pixels, clamped to 100..=1000.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Output file.
    #[arg(long, short)]
    pub out: PathBuf,
}

/// Execute the qrcode subcommand.
pub fn run_qrcode(args: &QrCodeArgs) -> Result<u8> {
    let image = QrRenderer
        .render(&args.data, args.size, args.format.into())
        .context("failed to render QR code")?;
    std::fs::write(&args.out, &image.bytes)
        .with_context(|| format!("failed to write image: {}", args.out.display()))?;
    println!("{} ({})", args.out.display(), image.content_type);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(data: &str, format: QrFormat, out: PathBuf) -> QrCodeArgs {
        QrCodeArgs {
            data: data.to_string(),
            format,
            size: DEFAULT_SIZE,
            out,
        }
    }

    #[test]
    fn writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("code.svg");
        assert_eq!(run_qrcode(&args("EVT-1", QrFormat::Svg, out.clone())).unwrap(), 0);
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("code.png");
        run_qrcode(&args("EVT-1", QrFormat::Png, out.clone())).unwrap();
        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn empty_data_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("code.png");
        assert!(run_qrcode(&args("", QrFormat::Png, out.clone())).is_err());
        assert!(!out.exists());
    }
}

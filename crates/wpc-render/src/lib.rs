//! # wpc-render — Barcode Image Rendering
//!
//! Turns barcode text into an image for previews and printing. Pixel
//! generation is delegated to the `qrcode` crate; this crate fixes the
//! parameters (size bounds, error-correction level, colors) and the output
//! encodings.

pub mod qr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use qr::QrRenderer;

/// Smallest accepted image edge, in pixels.
pub const MIN_SIZE: u32 = 100;
/// Largest accepted image edge, in pixels.
pub const MAX_SIZE: u32 = 1000;
/// Edge used when the caller does not ask for one.
pub const DEFAULT_SIZE: u32 = 300;

/// Clamp a requested edge length into `[MIN_SIZE, MAX_SIZE]`.
pub fn clamp_size(requested: u32) -> u32 {
    requested.clamp(MIN_SIZE, MAX_SIZE)
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// Encoded image bytes with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Data is required")]
    EmptyData,

    #[error("data cannot be encoded as a QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders barcode text into an image.
pub trait BarcodeRenderer: Send + Sync {
    /// `size` is clamped with [`clamp_size`] before rendering.
    fn render(&self, text: &str, size: u32, format: ImageFormat) -> Result<RenderedImage, RenderError>;
}

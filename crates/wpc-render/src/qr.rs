//! QR code rendering: error-correction level M, black on white.

use std::io::Cursor;

use image::{DynamicImage, Luma};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::{clamp_size, BarcodeRenderer, ImageFormat, RenderError, RenderedImage};

const DARK: &str = "#000000";
const LIGHT: &str = "#FFFFFF";

/// The QR implementation of [`BarcodeRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QrRenderer;

impl QrRenderer {
    fn encode(text: &str) -> Result<QrCode, RenderError> {
        if text.is_empty() {
            return Err(RenderError::EmptyData);
        }
        Ok(QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)?)
    }
}

impl BarcodeRenderer for QrRenderer {
    fn render(&self, text: &str, size: u32, format: ImageFormat) -> Result<RenderedImage, RenderError> {
        let code = Self::encode(text)?;
        let size = clamp_size(size);

        let bytes = match format {
            ImageFormat::Svg => code
                .render::<svg::Color>()
                .min_dimensions(size, size)
                .dark_color(svg::Color(DARK))
                .light_color(svg::Color(LIGHT))
                .build()
                .into_bytes(),
            ImageFormat::Png => {
                let pixels = code.render::<Luma<u8>>().min_dimensions(size, size).build();
                let mut out = Cursor::new(Vec::new());
                DynamicImage::ImageLuma8(pixels).write_to(&mut out, image::ImageFormat::Png)?;
                out.into_inner()
            }
        };

        Ok(RenderedImage {
            content_type: format.content_type(),
            bytes,
        })
    }
}

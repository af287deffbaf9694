//! # Barcodes
//!
//! The scannable code embedded in a pass.

use serde::{Deserialize, Serialize};

use crate::rules::DEFAULT_MESSAGE_ENCODING;

/// Barcode symbology. Wire values are pass-format identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[default]
    #[serde(rename = "PKBarcodeFormatQR")]
    Qr,
    #[serde(rename = "PKBarcodeFormatPDF417")]
    Pdf417,
    #[serde(rename = "PKBarcodeFormatAztec")]
    Aztec,
    #[serde(rename = "PKBarcodeFormatCode128")]
    Code128,
}

impl BarcodeFormat {
    /// Every supported symbology.
    pub const ALL: [BarcodeFormat; 4] = [Self::Qr, Self::Pdf417, Self::Aztec, Self::Code128];

    /// Return the pass-format identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qr => "PKBarcodeFormatQR",
            Self::Pdf417 => "PKBarcodeFormatPDF417",
            Self::Aztec => "PKBarcodeFormatAztec",
            Self::Code128 => "PKBarcodeFormatCode128",
        }
    }

    /// Human-readable name for editor menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Qr => "QR Code",
            Self::Pdf417 => "PDF417",
            Self::Aztec => "Aztec",
            Self::Code128 => "Code 128",
        }
    }
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A barcode as edited by the user.
///
/// `message` defaults to empty so that drafts deserialize; the validator
/// reports an empty message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    #[serde(default)]
    pub format: BarcodeFormat,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Barcode {
    /// A barcode with the default encoding and no alternate text.
    pub fn new(format: BarcodeFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
            message_encoding: None,
            alt_text: None,
        }
    }

    /// The caller's encoding, or `iso-8859-1` when none was given.
    pub fn encoding_or_default(&self) -> &str {
        self.message_encoding
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_MESSAGE_ENCODING)
    }
}

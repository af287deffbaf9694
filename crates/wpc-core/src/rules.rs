//! # Field Validation Rules
//!
//! The single-sourced table of length and format constraints for pass data.
//! Both the live-feedback endpoint and the submission gate read these values,
//! so a limit changed here changes everywhere.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length bounds for a text field, in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRule {
    /// Minimum length; `0` means the field may be empty.
    pub min: usize,
    /// Maximum length (inclusive).
    pub max: usize,
}

impl LengthRule {
    /// Whether `value` exceeds the maximum length.
    pub fn exceeded_by(&self, value: &str) -> bool {
        value.chars().count() > self.max
    }
}

/// `serialNumber`: 1..=128.
pub const SERIAL_NUMBER: LengthRule = LengthRule { min: 1, max: 128 };

/// `organizationName`: 1..=256.
pub const ORGANIZATION_NAME: LengthRule = LengthRule { min: 1, max: 256 };

/// `description`: 1..=256.
pub const DESCRIPTION: LengthRule = LengthRule { min: 1, max: 256 };

/// `logoText`: up to 256.
pub const LOGO_TEXT: LengthRule = LengthRule { min: 0, max: 256 };

/// Barcode `message`: up to 1024.
pub const BARCODE_MESSAGE: LengthRule = LengthRule { min: 1, max: 1024 };

/// Pass format version written into every assembled record.
pub const FORMAT_VERSION: u32 = 1;

/// Barcode message encoding used when the caller supplies none.
pub const DEFAULT_MESSAGE_ENCODING: &str = "iso-8859-1";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("static regex"));

// Channels are 1-3 digits with no 0-255 clamp.
static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)$").expect("static regex")
});

/// Whether `value` is an accepted pass color.
///
/// Accepts `#RRGGBB`, `#RGB` and `rgb(r, g, b)`. The check is purely
/// syntactic: `rgb(0, 999, 999)` is accepted.
pub fn is_valid_color(value: &str) -> bool {
    HEX_COLOR.is_match(value) || RGB_COLOR.is_match(value)
}

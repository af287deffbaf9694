//! # wpc-core — Wallet Pass Data Model and Validation
//!
//! Pure, dependency-light building blocks shared by every other crate in the
//! workspace:
//!
//! - [`pass`], [`field`], [`barcode`], [`images`]: the pass data model with
//!   exact pass-format wire names.
//! - [`rules`]: the single-sourced table of field constraints.
//! - [`validation`]: the validator used for live feedback and as the
//!   submission gate.
//! - [`serial`]: serial number generation.
//! - [`template`]: reusable editor templates.
//!
//! Nothing here performs I/O.

pub mod barcode;
pub mod field;
pub mod images;
pub mod pass;
pub mod rules;
pub mod serial;
pub mod template;
pub mod validation;

pub use barcode::{Barcode, BarcodeFormat};
pub use field::{DateStyle, FieldValue, PassField, TextAlignment};
pub use images::{ImageSet, ImageSlot};
pub use pass::{Bucket, Location, Nfc, PassData, PassStructure, PassStyle, PassType, UnknownPassType};
pub use rules::is_valid_color;
pub use template::{builtin_templates, check_template, PassTemplate};
pub use validation::{validate, validate_field, FieldError, ValidationReport};

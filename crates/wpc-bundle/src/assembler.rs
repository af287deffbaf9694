//! # Pass Record Assembler
//!
//! Maps validated [`PassData`], a [`PassType`] tag and an optional
//! [`ImageSet`] into the [`PassRecord`] a bundle producer consumes.
//!
//! The input is expected to have passed [`wpc_core::validate`]. Anything that
//! slips through (a missing identity key, a field without a value, a style
//! structure of the wrong type, undecodable image data) is reported as an
//! [`AssemblyError`], never repaired.

use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use wpc_core::rules::FORMAT_VERSION;
use wpc_core::{
    validate_field, Barcode, Bucket, ImageSet, ImageSlot, Location, Nfc, PassData, PassStructure,
    PassStyle, PassType,
};

use crate::error::AssemblyError;

static DATA_URI_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/[A-Za-z0-9_]+;base64,").expect("static regex"));

/// The `pass.json` document of a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassJson {
    pub format_version: u32,
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub team_identifier: String,
    pub organization_name: String,
    pub description: String,

    #[serde(flatten)]
    pub style: PassStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_strip_shine: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub barcodes: Vec<Barcode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voided: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfc: Option<Nfc>,
    #[serde(default, rename = "webServiceURL", skip_serializing_if = "Option::is_none")]
    pub web_service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, rename = "appLaunchURL", skip_serializing_if = "Option::is_none")]
    pub app_launch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_store_identifiers: Vec<u64>,
}

/// A decoded image ready to be written into a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassImage {
    pub slot: ImageSlot,
    pub bytes: Vec<u8>,
}

impl PassImage {
    /// Entry name inside the bundle, e.g. `icon.png`.
    pub fn file_name(&self) -> String {
        self.slot.file_name()
    }
}

/// Everything a bundle producer needs: the pass document and its images.
#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    pub pass: PassJson,
    pub images: Vec<PassImage>,
}

impl PassRecord {
    pub fn serial_number(&self) -> &str {
        &self.pass.serial_number
    }

    pub fn pass_type(&self) -> PassType {
        self.pass.style.pass_type()
    }
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, AssemblyError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or(AssemblyError::MissingKey(key))
}

fn check_structure(structure: &PassStructure) -> Result<(), AssemblyError> {
    for bucket in Bucket::ALL {
        let mut seen = HashSet::new();
        for (index, field) in structure.bucket(bucket).iter().enumerate() {
            validate_field(field).map_err(|source| AssemblyError::InvalidField {
                bucket,
                index,
                source,
            })?;
            if !seen.insert(field.key.as_str()) {
                return Err(AssemblyError::DuplicateKey {
                    bucket,
                    key: field.key.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Strip an optional `data:image/<kind>;base64,` prefix and decode.
pub fn decode_image(slot: ImageSlot, encoded: &str) -> Result<Vec<u8>, AssemblyError> {
    let payload = DATA_URI_PREFIX.replace(encoded, "");
    STANDARD
        .decode(payload.trim().as_bytes())
        .map_err(|source| AssemblyError::ImageDecode { slot, source })
}

/// Build a [`PassRecord`] from validated pass data.
pub fn assemble(
    data: &PassData,
    pass_type: PassType,
    images: Option<&ImageSet>,
) -> Result<PassRecord, AssemblyError> {
    let style = match &data.style {
        None => PassStyle::empty(pass_type),
        Some(style) if style.pass_type() == pass_type => style.clone(),
        Some(style) => {
            return Err(AssemblyError::StyleMismatch {
                expected: pass_type,
                found: style.pass_type(),
            })
        }
    };
    check_structure(style.structure())?;

    let barcodes = data
        .primary_barcode()
        .map(|b| Barcode {
            message_encoding: Some(b.encoding_or_default().to_string()),
            ..b.clone()
        })
        .into_iter()
        .collect();

    let pass = PassJson {
        format_version: FORMAT_VERSION,
        pass_type_identifier: required(&data.pass_type_identifier, "passTypeIdentifier")?,
        serial_number: required(&data.serial_number, "serialNumber")?,
        team_identifier: required(&data.team_identifier, "teamIdentifier")?,
        organization_name: required(&data.organization_name, "organizationName")?,
        description: required(&data.description, "description")?,
        style,
        background_color: data.background_color.clone(),
        foreground_color: data.foreground_color.clone(),
        label_color: data.label_color.clone(),
        logo_text: data.logo_text.clone(),
        suppress_strip_shine: data.suppress_strip_shine,
        grouping_identifier: data.grouping_identifier.clone(),
        barcodes,
        expiration_date: data.expiration_date.clone(),
        voided: data.voided,
        relevant_date: data.relevant_date.clone(),
        max_distance: data.max_distance,
        locations: data.locations.clone(),
        nfc: data.nfc.clone(),
        web_service_url: data.web_service_url.clone(),
        authentication_token: data.authentication_token.clone(),
        user_info: data.user_info.clone(),
        app_launch_url: data.app_launch_url.clone(),
        associated_store_identifiers: data.associated_store_identifiers.clone(),
    };

    let images = match images {
        Some(set) => set
            .present()
            .map(|(slot, encoded)| {
                Ok(PassImage {
                    slot,
                    bytes: decode_image(slot, encoded)?,
                })
            })
            .collect::<Result<Vec<_>, AssemblyError>>()?,
        None => Vec::new(),
    };

    Ok(PassRecord { pass, images })
}

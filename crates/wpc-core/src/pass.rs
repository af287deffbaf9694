//! # Pass Data Model
//!
//! [`PassData`] is the canonical pass description exchanged between the
//! editor and the service. It is always partial while being edited: the five
//! required identity keys are `Option`s and the validator reports which are
//! missing.
//!
//! ## Style structures
//!
//! A pass carries exactly one style structure (`boardingPass`, `coupon`,
//! `eventTicket`, `generic` or `storeCard`). [`PassStyle`] is a tagged union
//! over the five, flattened into [`PassData`] so the wire keeps the
//! pass-format keys while Rust code matches on a closed enum. A malformed
//! style block, or more than one style key, is a deserialization error.

use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::barcode::Barcode;
use crate::field::PassField;

/// The semantic category of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassType {
    BoardingPass,
    Coupon,
    EventTicket,
    Generic,
    StoreCard,
}

impl PassType {
    /// Every pass type, in editor menu order.
    pub const ALL: [PassType; 5] = [
        Self::BoardingPass,
        Self::Coupon,
        Self::EventTicket,
        Self::Generic,
        Self::StoreCard,
    ];

    /// Return the pass-format key for this type's style structure.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BoardingPass => "boardingPass",
            Self::Coupon => "coupon",
            Self::EventTicket => "eventTicket",
            Self::Generic => "generic",
            Self::StoreCard => "storeCard",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BoardingPass => "Boarding Pass",
            Self::Coupon => "Coupon",
            Self::EventTicket => "Event Ticket",
            Self::Generic => "Generic",
            Self::StoreCard => "Store Card",
        }
    }
}

impl std::fmt::Display for PassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string did not name a pass type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pass type: {0}")]
pub struct UnknownPassType(pub String);

impl FromStr for PassType {
    type Err = UnknownPassType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownPassType(s.to_string()))
    }
}

/// The five ordered display regions of a pass.
///
/// Order within each bucket is display order and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassStructure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auxiliary_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub back_fields: Vec<PassField>,
}

/// Names of the five field buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Header,
    Primary,
    Secondary,
    Auxiliary,
    Back,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Self::Header,
        Self::Primary,
        Self::Secondary,
        Self::Auxiliary,
        Self::Back,
    ];

    /// Return the pass-format key of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "headerFields",
            Self::Primary => "primaryFields",
            Self::Secondary => "secondaryFields",
            Self::Auxiliary => "auxiliaryFields",
            Self::Back => "backFields",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PassStructure {
    /// Fields of one bucket.
    pub fn bucket(&self, bucket: Bucket) -> &[PassField] {
        match bucket {
            Bucket::Header => &self.header_fields,
            Bucket::Primary => &self.primary_fields,
            Bucket::Secondary => &self.secondary_fields,
            Bucket::Auxiliary => &self.auxiliary_fields,
            Bucket::Back => &self.back_fields,
        }
    }

    /// Mutable fields of one bucket.
    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<PassField> {
        match bucket {
            Bucket::Header => &mut self.header_fields,
            Bucket::Primary => &mut self.primary_fields,
            Bucket::Secondary => &mut self.secondary_fields,
            Bucket::Auxiliary => &mut self.auxiliary_fields,
            Bucket::Back => &mut self.back_fields,
        }
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        Bucket::ALL.iter().all(|b| self.bucket(*b).is_empty())
    }
}

/// Tagged union over the five style structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassStyle {
    BoardingPass(PassStructure),
    Coupon(PassStructure),
    EventTicket(PassStructure),
    Generic(PassStructure),
    StoreCard(PassStructure),
}

impl PassStyle {
    /// An empty style structure of the given type.
    pub fn empty(pass_type: PassType) -> Self {
        Self::with_structure(pass_type, PassStructure::default())
    }

    /// Wrap `structure` in the variant for `pass_type`.
    pub fn with_structure(pass_type: PassType, structure: PassStructure) -> Self {
        match pass_type {
            PassType::BoardingPass => Self::BoardingPass(structure),
            PassType::Coupon => Self::Coupon(structure),
            PassType::EventTicket => Self::EventTicket(structure),
            PassType::Generic => Self::Generic(structure),
            PassType::StoreCard => Self::StoreCard(structure),
        }
    }

    /// The pass type this structure belongs to.
    pub fn pass_type(&self) -> PassType {
        match self {
            Self::BoardingPass(_) => PassType::BoardingPass,
            Self::Coupon(_) => PassType::Coupon,
            Self::EventTicket(_) => PassType::EventTicket,
            Self::Generic(_) => PassType::Generic,
            Self::StoreCard(_) => PassType::StoreCard,
        }
    }

    /// The field buckets, whatever the variant.
    pub fn structure(&self) -> &PassStructure {
        match self {
            Self::BoardingPass(s)
            | Self::Coupon(s)
            | Self::EventTicket(s)
            | Self::Generic(s)
            | Self::StoreCard(s) => s,
        }
    }

    /// Mutable field buckets, whatever the variant.
    pub fn structure_mut(&mut self) -> &mut PassStructure {
        match self {
            Self::BoardingPass(s)
            | Self::Coupon(s)
            | Self::EventTicket(s)
            | Self::Generic(s)
            | Self::StoreCard(s) => s,
        }
    }

    pub fn as_boarding_pass(&self) -> Option<&PassStructure> {
        match self {
            Self::BoardingPass(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_coupon(&self) -> Option<&PassStructure> {
        match self {
            Self::Coupon(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_event_ticket(&self) -> Option<&PassStructure> {
        match self {
            Self::EventTicket(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&PassStructure> {
        match self {
            Self::Generic(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_store_card(&self) -> Option<&PassStructure> {
        match self {
            Self::StoreCard(s) => Some(s),
            _ => None,
        }
    }
}

/// The five style keys as they appear on the wire.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleKeys {
    #[serde(default)]
    boarding_pass: Option<PassStructure>,
    #[serde(default)]
    coupon: Option<PassStructure>,
    #[serde(default)]
    event_ticket: Option<PassStructure>,
    #[serde(default)]
    generic: Option<PassStructure>,
    #[serde(default)]
    store_card: Option<PassStructure>,
}

fn deserialize_style<'de, D>(deserializer: D) -> Result<Option<PassStyle>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys = StyleKeys::deserialize(deserializer)?;
    let mut present = [
        keys.boarding_pass.map(PassStyle::BoardingPass),
        keys.coupon.map(PassStyle::Coupon),
        keys.event_ticket.map(PassStyle::EventTicket),
        keys.generic.map(PassStyle::Generic),
        keys.store_card.map(PassStyle::StoreCard),
    ]
    .into_iter()
    .flatten();

    let style = present.next();
    if let Some(extra) = present.next() {
        return Err(D::Error::custom(format!(
            "a pass carries one style structure, found both `{}` and `{}`",
            style.as_ref().map_or("", |s| s.pass_type().as_str()),
            extra.pass_type().as_str()
        )));
    }
    Ok(style)
}

/// A location where the pass is relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

/// NFC payload for contactless passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nfc {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_public_key: Option<String>,
}

/// The canonical, possibly partial, pass description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassData {
    // Standard keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_type_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_identifier: Option<String>,

    // Associated app keys
    #[serde(default, rename = "appLaunchURL", skip_serializing_if = "Option::is_none")]
    pub app_launch_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_store_identifiers: Vec<u64>,

    // Companion app keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<serde_json::Map<String, serde_json::Value>>,

    // Expiration keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voided: Option<bool>,

    // Relevance keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_date: Option<String>,

    // Style keys
    #[serde(flatten, deserialize_with = "deserialize_style")]
    pub style: Option<PassStyle>,

    // Visual appearance keys
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

    // Barcode keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub barcodes: Vec<Barcode>,
    /// Legacy single-barcode key, read when `barcodes` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,

    // NFC keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfc: Option<Nfc>,

    // Web service keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_token: Option<String>,
    #[serde(default, rename = "webServiceURL", skip_serializing_if = "Option::is_none")]
    pub web_service_url: Option<String>,
}

impl PassData {
    /// Whether `serialNumber` is absent or blank, i.e. the caller should
    /// assign one with [`crate::serial::generate`].
    pub fn needs_serial_number(&self) -> bool {
        self.serial_number
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
    }

    /// Assign a serial number only if none is present. Returns the serial in
    /// effect afterwards.
    pub fn ensure_serial_number(&mut self, generate: impl FnOnce() -> String) -> &str {
        if self.needs_serial_number() {
            self.serial_number = Some(generate());
        }
        self.serial_number.as_deref().unwrap_or_default()
    }

    /// The first barcode, falling back to the legacy singular key.
    pub fn primary_barcode(&self) -> Option<&Barcode> {
        self.barcodes.first().or(self.barcode.as_ref())
    }
}

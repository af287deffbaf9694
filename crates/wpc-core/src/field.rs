//! # Pass Fields
//!
//! Key/value entries displayed in one of a pass's five field buckets, plus the
//! closed enumerations for their display metadata. Enum wire values are the
//! identifiers defined by the pass format and must not be renamed.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a field's label and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAlignment {
    #[serde(rename = "PKTextAlignmentLeft")]
    Left,
    #[serde(rename = "PKTextAlignmentCenter")]
    Center,
    #[serde(rename = "PKTextAlignmentRight")]
    Right,
    #[serde(rename = "PKTextAlignmentNatural")]
    Natural,
}

impl TextAlignment {
    /// Return the pass-format identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "PKTextAlignmentLeft",
            Self::Center => "PKTextAlignmentCenter",
            Self::Right => "PKTextAlignmentRight",
            Self::Natural => "PKTextAlignmentNatural",
        }
    }
}

/// Date or time display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateStyle {
    #[serde(rename = "PKDateStyleNone")]
    None,
    #[serde(rename = "PKDateStyleShort")]
    Short,
    #[serde(rename = "PKDateStyleMedium")]
    Medium,
    #[serde(rename = "PKDateStyleLong")]
    Long,
    #[serde(rename = "PKDateStyleFull")]
    Full,
}

impl DateStyle {
    /// Return the pass-format identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "PKDateStyleNone",
            Self::Short => "PKDateStyleShort",
            Self::Medium => "PKDateStyleMedium",
            Self::Long => "PKDateStyleLong",
            Self::Full => "PKDateStyleFull",
        }
    }
}

/// A field value. Dates travel as ISO-8601 text and are styled through
/// [`PassField::date_style`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

/// One entry in a field bucket.
///
/// `value` is optional so that in-progress drafts deserialize; a field without
/// a value fails [`crate::validation::validate_field`] and is rejected by the
/// assembler.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassField {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_style: Option<DateStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_style: Option<DateStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_relative: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributed_value: Option<String>,
}

impl PassField {
    /// A bare key/value field with no display metadata.
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Builder-style label setter.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_values_are_pass_format_identifiers() {
        assert_eq!(
            serde_json::to_string(&TextAlignment::Center).unwrap(),
            "\"PKTextAlignmentCenter\""
        );
        assert_eq!(
            serde_json::to_string(&DateStyle::Medium).unwrap(),
            "\"PKDateStyleMedium\""
        );
        assert_eq!(TextAlignment::Natural.as_str(), "PKTextAlignmentNatural");
        assert_eq!(DateStyle::None.as_str(), "PKDateStyleNone");
    }

    #[test]
    fn field_value_accepts_text_and_numbers() {
        let f: PassField = serde_json::from_str(r#"{"key":"points","value":120}"#).unwrap();
        assert_eq!(f.value, Some(FieldValue::from(120)));

        let f: PassField =
            serde_json::from_str(r#"{"key":"date","value":"2025-01-01T10:00:00Z","dateStyle":"PKDateStyleShort"}"#)
                .unwrap();
        assert_eq!(f.value, Some(FieldValue::from("2025-01-01T10:00:00Z")));
        assert_eq!(f.date_style, Some(DateStyle::Short));
    }

    #[test]
    fn missing_value_deserializes_as_none() {
        let f: PassField = serde_json::from_str(r#"{"key":"draft"}"#).unwrap();
        assert!(f.value.is_none());
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_metadata() {
        let f = PassField::new("gate", "B12").with_label("Gate");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json, serde_json::json!({"key": "gate", "value": "B12", "label": "Gate"}));
    }

    #[test]
    fn unknown_alignment_is_rejected() {
        let res: Result<PassField, _> =
            serde_json::from_str(r#"{"key":"a","value":"1","textAlignment":"left"}"#);
        assert!(res.is_err());
    }
}

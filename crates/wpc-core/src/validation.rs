//! # Pass Data Validator
//!
//! Checks a candidate [`PassData`] against the field rules in
//! [`crate::rules`]. Validation is pure and total: it never fails, it returns
//! a [`ValidationReport`] whose messages appear in a fixed check order.
//! Every check runs; one failing check does not hide the others.
//!
//! The editor's live-feedback endpoint and the pass submission gate both call
//! [`validate`], so the rules exist in exactly one place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::PassField;
use crate::pass::PassData;
use crate::rules::{
    is_valid_color, LengthRule, BARCODE_MESSAGE, DESCRIPTION, LOGO_TEXT, ORGANIZATION_NAME,
    SERIAL_NUMBER,
};

/// Outcome of validating a pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// User-facing messages, one per violated rule, in check order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert into a `Result`, yielding the messages on failure.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Required text field: "required" when blank, otherwise "must not exceed".
fn check_required_text(
    errors: &mut Vec<String>,
    value: Option<&str>,
    label: &str,
    rule: LengthRule,
) {
    match value {
        v if is_blank(v) => errors.push(format!("{label} is required")),
        Some(v) if rule.exceeded_by(v) => {
            errors.push(format!("{label} must not exceed {} characters", rule.max))
        }
        _ => {}
    }
}

fn check_color(errors: &mut Vec<String>, value: Option<&str>, label: &str) {
    // An empty string counts as "not set", matching the editor's cleared input.
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        if !is_valid_color(v) {
            errors.push(format!("Invalid {label} color format"));
        }
    }
}

/// Validate a candidate pass.
///
/// Checks, in order:
/// 1. `description` present and within 256 chars
/// 2. `organizationName` present and within 256 chars
/// 3. `serialNumber` present and within 128 chars
/// 4. `passTypeIdentifier` present
/// 5. `teamIdentifier` present
/// 6. `backgroundColor` syntax
/// 7. `foregroundColor` then `labelColor` syntax
/// 8. each barcode message (1-based index) present and within 1024 chars
/// 9. `logoText` within 256 chars
pub fn validate(candidate: &PassData) -> ValidationReport {
    let mut errors = Vec::new();

    check_required_text(
        &mut errors,
        candidate.description.as_deref(),
        "Description",
        DESCRIPTION,
    );
    check_required_text(
        &mut errors,
        candidate.organization_name.as_deref(),
        "Organization name",
        ORGANIZATION_NAME,
    );
    check_required_text(
        &mut errors,
        candidate.serial_number.as_deref(),
        "Serial number",
        SERIAL_NUMBER,
    );

    if is_blank(candidate.pass_type_identifier.as_deref()) {
        errors.push("Pass type identifier is required".to_string());
    }
    if is_blank(candidate.team_identifier.as_deref()) {
        errors.push("Team identifier is required".to_string());
    }

    check_color(&mut errors, candidate.background_color.as_deref(), "background");
    check_color(&mut errors, candidate.foreground_color.as_deref(), "foreground");
    check_color(&mut errors, candidate.label_color.as_deref(), "label");

    for (index, barcode) in candidate.barcodes.iter().enumerate() {
        let n = index + 1;
        if barcode.message.trim().is_empty() {
            errors.push(format!("Barcode {n}: Message is required"));
        }
        if BARCODE_MESSAGE.exceeded_by(&barcode.message) {
            errors.push(format!("Barcode {n}: Message too long"));
        }
    }

    if let Some(logo_text) = candidate.logo_text.as_deref() {
        if LOGO_TEXT.exceeded_by(logo_text) {
            errors.push(format!(
                "Logo text must not exceed {} characters",
                LOGO_TEXT.max
            ));
        }
    }

    ValidationReport::from_errors(errors)
}

/// A pass field that cannot be placed on a pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field key is required")]
    MissingKey,
    #[error("Field value is required")]
    MissingValue,
}

/// Check a single field: non-blank key and a value.
pub fn validate_field(field: &PassField) -> Result<(), FieldError> {
    if field.key.trim().is_empty() {
        return Err(FieldError::MissingKey);
    }
    if field.value.is_none() {
        return Err(FieldError::MissingValue);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{Barcode, BarcodeFormat};

    fn valid_pass() -> PassData {
        PassData {
            description: Some("Loyalty Card".into()),
            organization_name: Some("Coffee Co".into()),
            serial_number: Some("SN-1".into()),
            pass_type_identifier: Some("pass.com.x".into()),
            team_identifier: Some("TEAM1".into()),
            ..PassData::default()
        }
    }

    #[test]
    fn valid_pass_has_no_errors() {
        let report = validate(&valid_pass());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn empty_pass_reports_required_fields_in_order() {
        let report = validate(&PassData::default());
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Description is required",
                "Organization name is required",
                "Serial number is required",
                "Pass type identifier is required",
                "Team identifier is required",
            ]
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let pass = PassData {
            description: Some("   ".into()),
            team_identifier: Some("\t".into()),
            ..valid_pass()
        };
        let report = validate(&pass);
        assert_eq!(
            report.errors,
            vec!["Description is required", "Team identifier is required"]
        );
    }

    #[test]
    fn too_long_fields_report_only_the_length_message() {
        let pass = PassData {
            description: Some("d".repeat(257)),
            organization_name: Some("o".repeat(257)),
            serial_number: Some("s".repeat(129)),
            ..valid_pass()
        };
        let report = validate(&pass);
        assert_eq!(
            report.errors,
            vec![
                "Description must not exceed 256 characters",
                "Organization name must not exceed 256 characters",
                "Serial number must not exceed 128 characters",
            ]
        );
    }

    #[test]
    fn length_limits_are_inclusive() {
        let pass = PassData {
            description: Some("d".repeat(256)),
            organization_name: Some("o".repeat(256)),
            serial_number: Some("s".repeat(128)),
            logo_text: Some("l".repeat(256)),
            ..valid_pass()
        };
        assert!(validate(&pass).valid);
    }

    #[test]
    fn invalid_colors_are_reported_per_key() {
        let pass = PassData {
            background_color: Some("blue".into()),
            foreground_color: Some("#12".into()),
            label_color: Some("rgb(1,2)".into()),
            ..valid_pass()
        };
        assert_eq!(
            validate(&pass).errors,
            vec![
                "Invalid background color format",
                "Invalid foreground color format",
                "Invalid label color format",
            ]
        );
    }

    #[test]
    fn valid_and_empty_colors_pass() {
        let pass = PassData {
            background_color: Some("#6B4423".into()),
            foreground_color: Some("rgb(255, 255, 255)".into()),
            label_color: Some(String::new()),
            ..valid_pass()
        };
        assert!(validate(&pass).valid);
    }

    #[test]
    fn empty_barcode_message_references_one_based_index() {
        let pass = PassData {
            barcodes: vec![Barcode::new(BarcodeFormat::Qr, "")],
            ..valid_pass()
        };
        let report = validate(&pass);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Barcode 1: Message is required"]);
    }

    #[test]
    fn overlong_barcode_message_is_reported() {
        let pass = PassData {
            barcodes: vec![
                Barcode::new(BarcodeFormat::Qr, "ok"),
                Barcode::new(BarcodeFormat::Qr, "x".repeat(1025)),
            ],
            ..valid_pass()
        };
        assert_eq!(validate(&pass).errors, vec!["Barcode 2: Message too long"]);
    }

    #[test]
    fn whitespace_only_overlong_barcode_reports_both() {
        let pass = PassData {
            barcodes: vec![Barcode::new(BarcodeFormat::Qr, " ".repeat(1025))],
            ..valid_pass()
        };
        assert_eq!(
            validate(&pass).errors,
            vec!["Barcode 1: Message is required", "Barcode 1: Message too long"]
        );
    }

    #[test]
    fn logo_text_limit_is_checked_last() {
        let pass = PassData {
            description: None,
            logo_text: Some("l".repeat(257)),
            ..valid_pass()
        };
        assert_eq!(
            validate(&pass).errors,
            vec![
                "Description is required",
                "Logo text must not exceed 256 characters"
            ]
        );
    }

    #[test]
    fn validation_does_not_fill_serial_number() {
        let pass = PassData {
            serial_number: Some(String::new()),
            ..valid_pass()
        };
        let report = validate(&pass);
        assert_eq!(report.errors, vec!["Serial number is required"]);
        assert_eq!(pass.serial_number.as_deref(), Some(""));
    }

    #[test]
    fn into_result_carries_messages() {
        assert!(validate(&valid_pass()).into_result().is_ok());
        let errs = validate(&PassData::default()).into_result().unwrap_err();
        assert_eq!(errs.len(), 5);
    }

    #[test]
    fn validate_field_requires_key_and_value() {
        assert_eq!(validate_field(&PassField::new("k", "v")), Ok(()));
        assert_eq!(
            validate_field(&PassField::new(" ", "v")),
            Err(FieldError::MissingKey)
        );
        let no_value = PassField {
            key: "k".into(),
            ..PassField::default()
        };
        assert_eq!(validate_field(&no_value), Err(FieldError::MissingValue));
        assert_eq!(FieldError::MissingValue.to_string(), "Field value is required");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> PassData {
        PassData {
            description: Some("Ticket".into()),
            organization_name: Some("Org".into()),
            serial_number: Some("SN".into()),
            pass_type_identifier: Some("pass.test".into()),
            team_identifier: Some("TEAM".into()),
            ..PassData::default()
        }
    }

    proptest! {
        /// Validation is total and deterministic.
        #[test]
        fn validate_is_deterministic(
            desc in proptest::option::of(".{0,300}"),
            org in proptest::option::of(".{0,300}"),
            color in proptest::option::of("[#a-z0-9(), ]{0,12}"),
        ) {
            let pass = PassData {
                description: desc,
                organization_name: org,
                background_color: color,
                ..base()
            };
            let a = validate(&pass);
            let b = validate(&pass);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.valid, a.errors.is_empty());
        }

        /// An overlong description yields exactly the length message.
        #[test]
        fn overlong_description_yields_single_length_error(extra in 1usize..200) {
            let pass = PassData {
                description: Some("a".repeat(256 + extra)),
                ..base()
            };
            let report = validate(&pass);
            prop_assert_eq!(
                report.errors,
                vec!["Description must not exceed 256 characters".to_string()]
            );
        }

        /// Any six-digit hex color is accepted.
        #[test]
        fn hex_colors_always_pass(hex in "[0-9a-fA-F]{6}") {
            let pass = PassData {
                background_color: Some(format!("#{hex}")),
                ..base()
            };
            prop_assert!(validate(&pass).valid);
        }

        /// Barcode errors reference the 1-based position of the bad entry.
        #[test]
        fn barcode_errors_use_one_based_index(good in 0usize..5) {
            let mut pass = base();
            for _ in 0..good {
                pass.barcodes.push(crate::barcode::Barcode::new(Default::default(), "ok"));
            }
            pass.barcodes.push(crate::barcode::Barcode::new(Default::default(), ""));
            let report = validate(&pass);
            prop_assert_eq!(
                report.errors,
                vec![format!("Barcode {}: Message is required", good + 1)]
            );
        }
    }
}

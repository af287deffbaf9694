//! # Pass Templates
//!
//! Reusable starting points for the editor: a pass type plus a partial
//! [`PassData`] whose values pre-fill the form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pass::{PassData, PassType};
use crate::rules::{is_valid_color, DESCRIPTION};

/// Maximum template name length, in characters.
pub const TEMPLATE_NAME_MAX: usize = 256;

/// A stored template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pass_type: PassType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub configuration: PassData,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check template metadata and the colors of its configuration.
///
/// The configuration is a partial pass, so only the checks that make sense
/// on a fragment are applied. Returns messages in check order.
pub fn check_template(
    name: &str,
    description: Option<&str>,
    configuration: &PassData,
) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("Template name is required".to_string());
    } else if name.chars().count() > TEMPLATE_NAME_MAX {
        errors.push(format!(
            "Template name must not exceed {TEMPLATE_NAME_MAX} characters"
        ));
    }
    if description.is_some_and(|d| DESCRIPTION.exceeded_by(d)) {
        errors.push(format!(
            "Template description must not exceed {} characters",
            DESCRIPTION.max
        ));
    }

    let colors = [
        ("background", &configuration.background_color),
        ("foreground", &configuration.foreground_color),
        ("label", &configuration.label_color),
    ];
    for (label, value) in colors {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            if !is_valid_color(v) {
                errors.push(format!("Invalid {label} color format"));
            }
        }
    }

    errors
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    description: &str,
    pass_type: PassType,
    organization: &str,
    pass_description: &str,
    colors: [&str; 3],
    now: DateTime<Utc>,
) -> PassTemplate {
    let [background, foreground, label] = colors;
    PassTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        pass_type,
        preview_image: None,
        configuration: PassData {
            organization_name: Some(organization.to_string()),
            description: Some(pass_description.to_string()),
            background_color: Some(background.to_string()),
            foreground_color: Some(foreground.to_string()),
            label_color: Some(label.to_string()),
            ..PassData::default()
        },
        is_public: true,
        created_at: now,
        updated_at: now,
    }
}

/// The catalogue a fresh service starts with.
pub fn builtin_templates(now: DateTime<Utc>) -> Vec<PassTemplate> {
    vec![
        seed(
            "1",
            "Coffee Shop Loyalty Card",
            "A simple loyalty card template for coffee shops",
            PassType::StoreCard,
            "Coffee Shop",
            "Loyalty Card",
            ["#6B4423", "#FFFFFF", "#D9C8B8"],
            now,
        ),
        seed(
            "2",
            "Event Ticket",
            "General event ticket template",
            PassType::EventTicket,
            "Event Organizer",
            "Event Ticket",
            ["#1E88E5", "#FFFFFF", "#BBDEFB"],
            now,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_are_public_and_valid() {
        let templates = builtin_templates(Utc::now());
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].pass_type, PassType::StoreCard);
        assert_eq!(templates[1].pass_type, PassType::EventTicket);
        for t in &templates {
            assert!(t.is_public);
            assert!(check_template(&t.name, t.description.as_deref(), &t.configuration).is_empty());
        }
    }

    #[test]
    fn template_serializes_camel_case() {
        let t = &builtin_templates(Utc::now())[0];
        let json = serde_json::to_value(t).unwrap();
        assert_eq!(json["passType"], "storeCard");
        assert_eq!(json["isPublic"], true);
        assert_eq!(json["configuration"]["backgroundColor"], "#6B4423");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn check_template_reports_name_and_colors() {
        let config = PassData {
            label_color: Some("purple".into()),
            ..PassData::default()
        };
        let errors = check_template("  ", None, &config);
        assert_eq!(
            errors,
            vec![
                "Template name is required".to_string(),
                "Invalid label color format".to_string(),
            ]
        );
    }

    #[test]
    fn check_template_enforces_length_limits() {
        let long = "x".repeat(257);
        let errors = check_template(&long, Some(&long), &PassData::default());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Template name must not exceed"));
        assert!(errors[1].starts_with("Template description must not exceed"));
    }
}

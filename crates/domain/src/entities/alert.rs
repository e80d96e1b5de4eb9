//! Administrative alert request

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Category of an administrative alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// General informational broadcast
    #[default]
    Info,
    /// Emergency advisory
    Emergency,
    /// Preventive health tip
    HealthTip,
}

/// Delivery priority of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    #[default]
    Normal,
    High,
}

/// An authenticated administrative broadcast request.
///
/// `message` is the only required field; the optional fields feed the
/// per-category templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRequest {
    /// Alert body; empty when absent so `validate` reports the failure
    #[serde(default)]
    pub message: String,
    /// Alert category
    #[serde(default)]
    pub alert_type: AlertType,
    /// Delivery priority
    #[serde(default)]
    pub priority: AlertPriority,
    /// Affected area for emergency alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_area: Option<String>,
    /// Safety instructions for emergency alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Topic category for health tips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AlertRequest {
    /// Create a plain informational alert
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            alert_type: AlertType::Info,
            priority: AlertPriority::Normal,
            affected_area: None,
            instructions: None,
            category: None,
        }
    }

    /// Create a high-priority emergency alert
    #[must_use]
    pub fn emergency(
        message: impl Into<String>,
        affected_area: Option<String>,
        instructions: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            alert_type: AlertType::Emergency,
            priority: AlertPriority::High,
            affected_area,
            instructions,
            category: None,
        }
    }

    /// Create a health tip broadcast
    #[must_use]
    pub fn health_tip(message: impl Into<String>, category: Option<String>) -> Self {
        Self {
            message: message.into(),
            alert_type: AlertType::HealthTip,
            priority: AlertPriority::Normal,
            affected_area: None,
            instructions: None,
            category,
        }
    }

    /// Validate the request before any dispatch work happens
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.message.trim().is_empty() {
            return Err(DomainError::missing_field("message"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_constructor_defaults() {
        let alert = AlertRequest::info("stay hydrated");
        assert_eq!(alert.alert_type, AlertType::Info);
        assert_eq!(alert.priority, AlertPriority::Normal);
        assert!(alert.affected_area.is_none());
    }

    #[test]
    fn emergency_constructor_sets_high_priority() {
        let alert = AlertRequest::emergency(
            "dengue outbreak",
            Some("Sector 4".to_string()),
            Some("eliminate standing water".to_string()),
        );
        assert_eq!(alert.alert_type, AlertType::Emergency);
        assert_eq!(alert.priority, AlertPriority::High);
        assert_eq!(alert.affected_area.as_deref(), Some("Sector 4"));
    }

    #[test]
    fn validate_accepts_non_empty_message() {
        assert!(AlertRequest::info("hello").validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_message() {
        let err = AlertRequest::info("").validate().unwrap_err();
        assert!(err.to_string().contains("message is required"));
    }

    #[test]
    fn validate_rejects_whitespace_message() {
        assert!(AlertRequest::info("   ").validate().is_err());
    }

    #[test]
    fn alert_type_deserializes_snake_case() {
        let parsed: AlertType = serde_json::from_str(r#""health_tip""#).unwrap();
        assert_eq!(parsed, AlertType::HealthTip);
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let parsed: AlertRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(parsed.alert_type, AlertType::Info);
        assert_eq!(parsed.priority, AlertPriority::Normal);
    }

    #[test]
    fn absent_message_deserializes_empty_and_fails_validation() {
        let parsed: AlertRequest = serde_json::from_str(r#"{"alert_type":"info"}"#).unwrap();
        assert!(parsed.message.is_empty());
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn serialization_skips_absent_optionals() {
        let json = serde_json::to_string(&AlertRequest::info("hi")).unwrap();
        assert!(!json.contains("affected_area"));
        assert!(!json.contains("instructions"));
        assert!(!json.contains("category"));
    }
}

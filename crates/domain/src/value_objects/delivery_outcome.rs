//! Outcome of a single outbound send
//!
//! Gateway failures are captured as data, never propagated as errors across
//! the pipeline boundary.

use serde::{Deserialize, Serialize};

/// Result of one send attempt against a messaging gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Whether the gateway accepted the message
    pub success: bool,
    /// Provider-assigned message ID, when accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Provider-reported delivery status, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Failure detail, when not accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryOutcome {
    /// A successful delivery acknowledged by the provider
    #[must_use]
    pub fn delivered(provider_id: Option<String>, status: Option<String>) -> Self {
        Self {
            success: true,
            provider_id,
            status,
            error: None,
        }
    }

    /// A failed delivery with the captured detail
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            provider_id: None,
            status: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_outcome() {
        let outcome = DeliveryOutcome::delivered(
            Some("wamid.123".to_string()),
            Some("accepted".to_string()),
        );
        assert!(outcome.success);
        assert_eq!(outcome.provider_id.as_deref(), Some("wamid.123"));
        assert!(outcome.error.is_none());
    }

    #[test]
    fn failed_outcome_carries_detail() {
        let outcome = DeliveryOutcome::failed("HTTP 500");
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("HTTP 500"));
        assert!(outcome.provider_id.is_none());
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let json = serde_json::to_string(&DeliveryOutcome::failed("boom")).unwrap();
        assert!(json.contains("error"));
        assert!(!json.contains("provider_id"));
        assert!(!json.contains("status"));
    }
}

//! Alert broadcast configuration.

use serde::{Deserialize, Serialize};

/// Broadcast and canned-reply settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Emergency services number interpolated into replies and alerts
    #[serde(default = "default_emergency_number")]
    pub emergency_number: String,

    /// Recipient identifiers for admin broadcasts
    #[serde(default)]
    pub broadcast_recipients: Vec<String>,
}

fn default_emergency_number() -> String {
    "112".to_string()
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            emergency_number: default_emergency_number(),
            broadcast_recipients: Vec::new(),
        }
    }
}

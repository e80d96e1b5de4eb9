//! Normalized inbound message
//!
//! The platform-neutral record extracted from one webhook delivery.

use serde::{Deserialize, Serialize};

/// Fallback display name when the wire payload carries no contact profile
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// A user message normalized from a single webhook delivery.
///
/// Produced from at most one inbound event and handed to at most one reply
/// attempt. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform-unique message ID
    pub message_id: String,
    /// Sender's platform recipient identifier (phone number for WhatsApp)
    pub sender: String,
    /// Unix timestamp of the message, 0 when absent or unparseable
    pub sent_at: i64,
    /// Message kind as reported by the platform ("text", "image", ...)
    pub kind: String,
    /// Text body, empty for kinds that carry none
    pub text: String,
    /// Sender's profile name, "Unknown" when absent
    pub display_name: String,
}

impl InboundMessage {
    /// Whether the message carries user-visible text worth replying to
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

//! Inbound parser port
//!
//! Turns one raw webhook event into at most one normalized message.
//! Structural anomalies are "no message", never errors - delivery receipts
//! and status callbacks are expected traffic.

#[cfg(test)]
use mockall::automock;

use domain::InboundMessage;

/// Extracts a normalized message from a platform-specific webhook payload
#[cfg_attr(test, automock)]
pub trait InboundParserPort: Send + Sync {
    /// Parse a raw inbound event; `None` when it carries no user message
    fn parse(&self, event: &serde_json::Value) -> Option<InboundMessage>;
}

//! Message gateway port - Unified interface for outbound messaging
//!
//! Abstracts send operations across delivery channels (WhatsApp Cloud API,
//! Twilio SMS) behind one seam the pipeline and dispatcher share. Send
//! failures are returned as `DeliveryOutcome` values, never as errors.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::DeliveryOutcome;

/// Unified port for outbound messaging gateways
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageGatewayPort: Send + Sync {
    /// Send a text message to a single recipient.
    ///
    /// Transport failures and provider rejections are folded into the
    /// returned outcome; this call itself is total.
    async fn send_text(&self, recipient: &str, text: &str) -> DeliveryOutcome;

    /// Send a broadcast alert to a single recipient.
    ///
    /// Implementations may allow a longer deadline than interactive
    /// replies; the default delegates to [`Self::send_text`].
    async fn send_alert(&self, recipient: &str, text: &str) -> DeliveryOutcome {
        self.send_text(recipient, text).await
    }

    /// Check if the gateway is reachable
    async fn is_available(&self) -> bool;

    /// Release the underlying connection resource; safe when never opened
    async fn close(&self);
}

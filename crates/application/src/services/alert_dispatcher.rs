//! Admin broadcast dispatcher
//!
//! Formats an alert per category and fans it out independently to every
//! known recipient, with bounded retry and exponential backoff per
//! recipient. One recipient's failure never blocks or fails the others;
//! the aggregate result is always the full list.

use std::sync::Arc;
use std::time::Duration;

use domain::{AlertRequest, AlertType, DeliveryOutcome, mask_recipient};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{MessageGatewayPort, RecipientDirectoryPort};

/// Bounded retry with exponential backoff for broadcast sends.
///
/// Delay before retry `n` (0-indexed) is `base_delay * 2^n`: with the
/// one-second default that is 1s, then 2s.
#[derive(Debug, Clone)]
pub struct BroadcastRetryPolicy {
    /// Total attempts per recipient, including the first
    pub max_attempts: u32,
    /// Base backoff delay, doubled after each failed attempt
    pub base_delay: Duration,
}

impl Default for BroadcastRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl BroadcastRetryPolicy {
    /// Backoff delay after the given failed attempt (0-indexed)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Delivery result for one broadcast recipient
#[derive(Debug, Clone, Serialize)]
pub struct RecipientDelivery {
    /// Recipient identifier the alert was addressed to
    pub recipient: String,
    /// Attempts made, including the final one
    pub attempts: u32,
    /// Final outcome after retries
    pub outcome: DeliveryOutcome,
}

/// Dispatches authenticated admin alerts to the full recipient set
pub struct AlertDispatcher {
    gateway: Arc<dyn MessageGatewayPort>,
    directory: Arc<dyn RecipientDirectoryPort>,
    emergency_number: String,
    retry: BroadcastRetryPolicy,
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("emergency_number", &self.emergency_number)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl AlertDispatcher {
    /// Create a dispatcher over a gateway and a recipient directory
    #[must_use]
    pub fn new(
        gateway: Arc<dyn MessageGatewayPort>,
        directory: Arc<dyn RecipientDirectoryPort>,
        emergency_number: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            directory,
            emergency_number: emergency_number.into(),
            retry: BroadcastRetryPolicy::default(),
        }
    }

    /// Override the retry policy (tests, tuning)
    #[must_use]
    pub fn with_retry_policy(mut self, retry: BroadcastRetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Format the final alert text for its category.
    ///
    /// Fixed templates interpolating the configured emergency number and the
    /// request's optional fields.
    #[must_use]
    pub fn format_alert(&self, request: &AlertRequest) -> String {
        match request.alert_type {
            AlertType::Emergency => {
                let mut text = format!("🚨 EMERGENCY ALERT\n\n{}", request.message);
                if let Some(area) = &request.affected_area {
                    text.push_str(&format!("\n\n📍 Affected area: {area}"));
                }
                if let Some(instructions) = &request.instructions {
                    text.push_str(&format!("\n\n📋 Instructions: {instructions}"));
                }
                text.push_str(&format!(
                    "\n\n📞 Emergency services: {}",
                    self.emergency_number
                ));
                text
            },
            AlertType::HealthTip => {
                let heading = request.category.as_ref().map_or_else(
                    || "💡 HEALTH TIP".to_string(),
                    |category| format!("💡 HEALTH TIP ({category})"),
                );
                format!(
                    "{heading}\n\n{}\n\n📞 Emergency: Call {}",
                    request.message, self.emergency_number
                )
            },
            AlertType::Info => format!(
                "📢 HEALTH ADVISORY\n\n{}\n\n📞 Emergency: Call {}",
                request.message, self.emergency_number
            ),
        }
    }

    /// Broadcast an alert to every known recipient.
    ///
    /// Validates before any network call, then fans out independently; the
    /// returned list always covers the full recipient set.
    #[instrument(skip(self, request), fields(alert_type = ?request.alert_type))]
    pub async fn broadcast(
        &self,
        request: &AlertRequest,
    ) -> Result<Vec<RecipientDelivery>, ApplicationError> {
        request.validate()?;

        let text = self.format_alert(request);
        let recipients = self.directory.broadcast_recipients().await?;

        info!(
            recipients = recipients.len(),
            priority = ?request.priority,
            "Broadcasting alert"
        );

        let mut deliveries = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let delivery = self.send_with_retry(&recipient, &text).await;
            if !delivery.outcome.success {
                warn!(
                    recipient = %mask_recipient(&recipient),
                    attempts = delivery.attempts,
                    "Alert delivery failed after retries"
                );
            }
            deliveries.push(delivery);
        }

        let sent = deliveries.iter().filter(|d| d.outcome.success).count();
        info!(sent, total = deliveries.len(), "Broadcast complete");
        Ok(deliveries)
    }

    /// Broadcast a high-priority emergency alert
    pub async fn send_emergency_alert(
        &self,
        message: impl Into<String>,
        affected_area: Option<String>,
        instructions: Option<String>,
    ) -> Result<Vec<RecipientDelivery>, ApplicationError> {
        let request = AlertRequest::emergency(message, affected_area, instructions);
        self.broadcast(&request).await
    }

    /// Broadcast a health tip
    pub async fn send_health_tip(
        &self,
        message: impl Into<String>,
        category: Option<String>,
    ) -> Result<Vec<RecipientDelivery>, ApplicationError> {
        let request = AlertRequest::health_tip(message, category);
        self.broadcast(&request).await
    }

    /// Send to one recipient with bounded retry.
    ///
    /// The final attempt's failure is surfaced in the outcome rather than
    /// retried further.
    async fn send_with_retry(&self, recipient: &str, text: &str) -> RecipientDelivery {
        let mut attempt = 0u32;
        loop {
            let outcome = self.gateway.send_alert(recipient, text).await;
            let attempts = attempt + 1;

            if outcome.success || attempts >= self.retry.max_attempts {
                return RecipientDelivery {
                    recipient: recipient.to_string(),
                    attempts,
                    outcome,
                };
            }

            let delay = self.retry.delay_for_attempt(attempt);
            warn!(
                recipient = %mask_recipient(recipient),
                attempt = attempts,
                delay_ms = delay.as_millis() as u64,
                "Alert send failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

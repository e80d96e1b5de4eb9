//! Inbound message pipeline
//!
//! Composes parse -> route -> send for one webhook delivery. Every branch is
//! terminal and total: a payload without a user message ends in `NoMessage`
//! with zero send attempts, and a gateway failure is carried in the report
//! rather than raised. Exactly one send attempt happens per message with
//! user-visible text; the pipeline itself never retries (idempotency is the
//! platform's job via the message ID).

use std::sync::Arc;

use domain::{DeliveryOutcome, mask_recipient};
use serde::Serialize;
use tracing::{info, instrument};

use crate::ports::{InboundParserPort, MessageGatewayPort};
use crate::services::reply_catalog::ReplyCatalog;

/// Terminal result of processing one inbound delivery
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineReport {
    /// A user message was found and exactly one reply send was attempted
    Processed {
        message_id: String,
        sent: bool,
        outcome: DeliveryOutcome,
    },
    /// The payload carried no user message (status callback, receipt, ...)
    NoMessage,
}

impl PipelineReport {
    /// Whether the reply reached the gateway successfully
    #[must_use]
    pub const fn sent(&self) -> bool {
        matches!(self, Self::Processed { sent: true, .. })
    }
}

/// Orchestrates the inbound path: verify happens at the HTTP boundary, then
/// parse, route, and dispatch the reply.
pub struct MessagePipeline {
    parser: Arc<dyn InboundParserPort>,
    gateway: Arc<dyn MessageGatewayPort>,
    replies: ReplyCatalog,
}

impl std::fmt::Debug for MessagePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagePipeline")
            .field("replies", &self.replies)
            .finish_non_exhaustive()
    }
}

impl MessagePipeline {
    /// Create a pipeline over an inbound parser and an outbound gateway
    #[must_use]
    pub fn new(
        parser: Arc<dyn InboundParserPort>,
        gateway: Arc<dyn MessageGatewayPort>,
        replies: ReplyCatalog,
    ) -> Self {
        Self {
            parser,
            gateway,
            replies,
        }
    }

    /// Process one raw inbound event to a terminal report.
    ///
    /// Never fails: malformed or message-less payloads are expected traffic
    /// and end in `NoMessage`; send failures end in `Processed { sent: false }`.
    #[instrument(skip(self, event))]
    pub async fn process_event(&self, event: &serde_json::Value) -> PipelineReport {
        let Some(message) = self.parser.parse(event) else {
            info!("No processable message in inbound event");
            return PipelineReport::NoMessage;
        };

        info!(
            message_id = %message.message_id,
            sender = %mask_recipient(&message.sender),
            kind = %message.kind,
            "Processing inbound message"
        );

        if !message.has_text() {
            info!(
                message_id = %message.message_id,
                "Message carries no text body; replying with the menu"
            );
        }

        let reply = self.replies.reply_for(&message.text);
        let outcome = self.gateway.send_text(&message.sender, &reply).await;

        if !outcome.success {
            info!(
                message_id = %message.message_id,
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "Reply send failed; reported, not raised"
            );
        }

        PipelineReport::Processed {
            message_id: message.message_id,
            sent: outcome.success,
            outcome,
        }
    }
}

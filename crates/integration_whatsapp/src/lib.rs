//! WhatsApp integration
//!
//! Sends messages through the Meta Graph API and parses inbound Cloud API
//! webhook deliveries.

pub mod client;
pub mod webhook;

pub use client::{WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
pub use webhook::{WebhookPayload, WhatsAppParser, parse_message, verify_signature};

//! Twilio SMS integration
//!
//! Sends SMS through the Twilio Messages API as the fallback broadcast
//! channel, and verifies shared-token webhooks.

pub mod client;

pub use client::{SmsError, TwilioSmsClient, TwilioSmsConfig};

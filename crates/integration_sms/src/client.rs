//! Twilio SMS client
//!
//! Posts to the Twilio Messages API with basic auth. The HTTP client is
//! built lazily on first send, mirroring the WhatsApp gateway lifecycle.

use std::time::Duration;

use application::ports::MessageGatewayPort;
use async_trait::async_trait;
use domain::{DeliveryOutcome, mask_recipient};
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(30);
// Broadcast sends tolerate slow gateway responses.
const BROADCAST_TIMEOUT: Duration = Duration::from_secs(120);

/// Twilio client errors
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("Missing configuration: {0}")]
    Configuration(String),
}

/// Twilio SMS client configuration
#[derive(Clone)]
pub struct TwilioSmsConfig {
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: String,
    /// Sender phone number in E.164 format
    pub from_number: String,
    /// Shared token expected on inbound webhook requests
    pub webhook_token: Option<String>,
}

impl std::fmt::Debug for TwilioSmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioSmsConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .field(
                "webhook_token",
                &self.webhook_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Twilio SMS client
pub struct TwilioSmsClient {
    client: Mutex<Option<Client>>,
    config: TwilioSmsConfig,
    base_url: String,
}

impl std::fmt::Debug for TwilioSmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioSmsClient")
            .field("account_sid", &self.config.account_sid)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Relevant subset of the Twilio message resource
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: Option<String>,
    status: Option<String>,
}

impl TwilioSmsClient {
    /// Create a new Twilio SMS client
    pub fn new(config: TwilioSmsConfig) -> Result<Self, SmsError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(SmsError::Configuration(
                "account_sid and auth_token are required".to_string(),
            ));
        }
        if config.from_number.is_empty() {
            return Err(SmsError::Configuration(
                "from_number is required".to_string(),
            ));
        }

        Ok(Self {
            client: Mutex::new(None),
            config,
            base_url: "https://api.twilio.com".to_string(),
        })
    }

    /// Point the client at a different API root (tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Verify an inbound webhook's shared token in constant time.
    ///
    /// Fails closed: no configured token, or no presented token, means
    /// rejection.
    #[must_use]
    pub fn verify_webhook_token(&self, presented: Option<&str>) -> bool {
        match (self.config.webhook_token.as_deref(), presented) {
            (Some(expected), Some(presented)) if !expected.is_empty() => {
                expected.as_bytes().ct_eq(presented.as_bytes()).into()
            },
            _ => false,
        }
    }

    fn http_client(&self) -> Client {
        let mut guard = self.client.lock();
        if let Some(client) = guard.as_ref() {
            return client.clone();
        }
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();
        *guard = Some(client.clone());
        client
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.config.account_sid
        )
    }

    async fn post_sms(&self, recipient: &str, text: &str, timeout: Duration) -> DeliveryOutcome {
        info!(recipient = %mask_recipient(recipient), "Sending SMS");

        let response = self
            .http_client()
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .timeout(timeout)
            .form(&[
                ("To", recipient),
                ("From", self.config.from_number.as_str()),
                ("Body", text),
            ])
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                let parsed: TwilioMessageResponse =
                    response.json().await.unwrap_or(TwilioMessageResponse {
                        sid: None,
                        status: None,
                    });
                DeliveryOutcome::delivered(parsed.sid, parsed.status)
            },
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(status = %status, "Twilio send rejected");
                DeliveryOutcome::failed(format!("HTTP {status}: {body}"))
            },
            Err(err) => {
                error!(error = %err, "Twilio send failed");
                DeliveryOutcome::failed(err.to_string())
            },
        }
    }
}

#[async_trait]
impl MessageGatewayPort for TwilioSmsClient {
    #[instrument(skip(self, text))]
    async fn send_text(&self, recipient: &str, text: &str) -> DeliveryOutcome {
        self.post_sms(recipient, text, SEND_TIMEOUT).await
    }

    #[instrument(skip(self, text))]
    async fn send_alert(&self, recipient: &str, text: &str) -> DeliveryOutcome {
        self.post_sms(recipient, text, BROADCAST_TIMEOUT).await
    }

    /// Credentials are checked at construction; the API has no cheap ping
    async fn is_available(&self) -> bool {
        true
    }

    async fn close(&self) {
        let dropped = self.client.lock().take().is_some();
        if dropped {
            warn!("Twilio HTTP client closed");
        }
    }
}

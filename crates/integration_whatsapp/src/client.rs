//! WhatsApp client for sending messages
//!
//! Uses the Meta Graph API to send WhatsApp messages. The HTTP client is
//! built lazily on first send and can be dropped with [`WhatsAppClient::close`].

use std::time::Duration;

use application::ports::MessageGatewayPort;
use async_trait::async_trait;
use domain::{DeliveryOutcome, mask_recipient};
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(30);
// Broadcast sends tolerate slow gateway responses.
const BROADCAST_TIMEOUT: Duration = Duration::from_secs(120);

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("Missing configuration: {0}")]
    Configuration(String),
}

/// WhatsApp client configuration
#[derive(Debug, Clone)]
pub struct WhatsAppClientConfig {
    /// Meta Graph API access token
    pub access_token: String,
    /// Phone number ID from WhatsApp Business
    pub phone_number_id: String,
    /// Verify token for webhook setup
    pub verify_token: String,
    /// API version (default: v17.0)
    pub api_version: String,
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            verify_token: String::new(),
            api_version: "v17.0".to_string(),
        }
    }
}

/// WhatsApp client for the Meta Graph API
pub struct WhatsAppClient {
    client: Mutex<Option<Client>>,
    config: WhatsAppClientConfig,
    base_url: String,
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("phone_number_id", &self.config.phone_number_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Message send request
#[derive(Debug, Serialize)]
struct SendMessageRequest {
    messaging_product: &'static str,
    to: String,
    #[serde(rename = "type")]
    msg_type: &'static str,
    text: TextContent,
}

#[derive(Debug, Serialize)]
struct TextContent {
    body: String,
}

/// API response for a sent message
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<MessageInfo>,
}

#[derive(Debug, Deserialize)]
struct MessageInfo {
    id: String,
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.phone_number_id.is_empty() {
            return Err(WhatsAppError::Configuration(
                "phone_number_id is required".to_string(),
            ));
        }

        let base_url = format!(
            "https://graph.facebook.com/{}/{}",
            config.api_version, config.phone_number_id
        );

        Ok(Self {
            client: Mutex::new(None),
            config,
            base_url,
        })
    }

    /// Point the client at a different API root (tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.config.api_version,
            self.config.phone_number_id
        );
        self
    }

    /// Get the verify token for webhook setup
    #[must_use]
    pub fn verify_token(&self) -> &str {
        &self.config.verify_token
    }

    /// Normalize a recipient to E.164: strip spaces, hyphens and any
    /// existing plus, then prepend one.
    #[must_use]
    pub fn normalize_recipient(raw: &str) -> String {
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != '+' && *c != ' ' && *c != '-')
            .collect();
        format!("+{cleaned}")
    }

    /// Get or lazily build the underlying HTTP client
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

    async fn post_text(&self, recipient: &str, text: &str, timeout: Duration) -> DeliveryOutcome {
        let to = Self::normalize_recipient(recipient);
        info!(recipient = %mask_recipient(&to), "Sending WhatsApp message");

        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to,
            msg_type: "text",
            text: TextContent {
                body: text.to_string(),
            },
        };

        let response = self
            .http_client()
            .post(format!("{}/messages", self.base_url))
            .bearer_auth(&self.config.access_token)
            .timeout(timeout)
            .json(&request)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                let parsed: SendMessageResponse = response.json().await.unwrap_or(
                    SendMessageResponse { messages: Vec::new() },
                );
                let provider_id = parsed.messages.into_iter().next().map(|m| m.id);
                debug!("WhatsApp message accepted");
                DeliveryOutcome::delivered(provider_id, Some("accepted".to_string()))
            },
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(status = %status, "WhatsApp send rejected");
                DeliveryOutcome::failed(format!("HTTP {status}: {body}"))
            },
            Err(err) => {
                error!(error = %err, "WhatsApp send failed");
                DeliveryOutcome::failed(err.to_string())
            },
        }
    }
}

#[async_trait]
impl MessageGatewayPort for WhatsAppClient {
    #[instrument(skip(self, text))]
    async fn send_text(&self, recipient: &str, text: &str) -> DeliveryOutcome {
        self.post_text(recipient, text, SEND_TIMEOUT).await
    }

    #[instrument(skip(self, text))]
    async fn send_alert(&self, recipient: &str, text: &str) -> DeliveryOutcome {
        self.post_text(recipient, text, BROADCAST_TIMEOUT).await
    }

    /// Fetch the business profile as a lightweight reachability check
    async fn is_available(&self) -> bool {
        self.http_client()
            .get(format!("{}/whatsapp_business_profile", self.base_url))
            .bearer_auth(&self.config.access_token)
            .query(&[("fields", "about")])
            .send()
            .await
            .is_ok_and(|res| res.status().is_success())
    }

    async fn close(&self) {
        let dropped = self.client.lock().take().is_some();
        if dropped {
            warn!("WhatsApp HTTP client closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> WhatsAppClientConfig {
        WhatsAppClientConfig {
            access_token: "test_token".to_string(),
            phone_number_id: "123456789".to_string(),
            verify_token: "verify_test".to_string(),
            api_version: "v17.0".to_string(),
        }
    }

    #[test]
    fn client_creation_requires_access_token() {
        let config = WhatsAppClientConfig {
            access_token: String::new(),
            phone_number_id: "123".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            WhatsAppClient::new(config),
            Err(WhatsAppError::Configuration(_))
        ));
    }

    #[test]
    fn client_creation_requires_phone_number_id() {
        let config = WhatsAppClientConfig {
            access_token: "token".to_string(),
            phone_number_id: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            WhatsAppClient::new(config),
            Err(WhatsAppError::Configuration(_))
        ));
    }

    #[test]
    fn base_url_includes_version_and_phone_id() {
        let client = WhatsAppClient::new(test_config()).unwrap();
        assert_eq!(
            client.base_url,
            "https://graph.facebook.com/v17.0/123456789"
        );
    }

    #[test]
    fn with_base_url_rewrites_api_root() {
        let client = WhatsAppClient::new(test_config())
            .unwrap()
            .with_base_url("http://localhost:9090/");
        assert_eq!(client.base_url, "http://localhost:9090/v17.0/123456789");
    }

    #[test]
    fn normalize_recipient_strips_formatting() {
        assert_eq!(WhatsAppClient::normalize_recipient("+1 555-123 4567"), "+15551234567");
        assert_eq!(WhatsAppClient::normalize_recipient("15551234567"), "+15551234567");
    }

    #[test]
    fn verify_token_getter() {
        let client = WhatsAppClient::new(test_config()).unwrap();
        assert_eq!(client.verify_token(), "verify_test");
    }

    #[tokio::test]
    async fn close_drops_lazy_client() {
        let client = WhatsAppClient::new(test_config()).unwrap();
        let _ = client.http_client();
        assert!(client.client.lock().is_some());
        client.close().await;
        assert!(client.client.lock().is_none());
    }
}

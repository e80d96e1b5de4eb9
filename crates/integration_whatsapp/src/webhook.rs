//! WhatsApp webhook payloads
//!
//! Validates and parses inbound Cloud API webhook deliveries. Only the first
//! message of the first change of the first entry is extracted, matching the
//! delivery shape Meta sends for a single user message.

use application::ports::InboundParserPort;
use domain::{InboundMessage, UNKNOWN_DISPLAY_NAME};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// WhatsApp webhook envelope
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub value: WebhookValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookValue {
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
    #[serde(default)]
    pub contacts: Vec<WebhookContact>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub msg_type: String,
    #[serde(default)]
    pub text: Option<TextMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TextMessage {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookContact {
    #[serde(default)]
    pub profile: Option<ContactProfile>,
}

#[derive(Debug, Deserialize)]
pub struct ContactProfile {
    #[serde(default)]
    pub name: String,
}

/// Verify a webhook signature (`sha256=<hex>` over the raw body)
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    let expected_prefix = "sha256=";
    let Some(signature_hex) = signature.strip_prefix(expected_prefix) else {
        warn!("Invalid signature format");
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        warn!("Failed to create HMAC");
        return false;
    };

    mac.update(payload);

    let Ok(expected) = hex::decode(signature_hex) else {
        warn!("Failed to decode signature hex");
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}

/// Extract the first message of a webhook delivery.
///
/// Returns `None` for non-message events such as delivery status updates,
/// and for payloads that do not match the expected envelope at all. A
/// missing contact profile falls back to the unknown display name, and an
/// unparseable timestamp to zero.
pub fn parse_message(event: &serde_json::Value) -> Option<InboundMessage> {
    let payload: WebhookPayload = match serde_json::from_value(event.clone()) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "Webhook payload did not match the expected envelope");
            return None;
        },
    };

    let value = &payload.entry.first()?.changes.first()?.value;
    let message = value.messages.first()?;

    let display_name = value
        .contacts
        .first()
        .and_then(|c| c.profile.as_ref())
        .map_or_else(|| UNKNOWN_DISPLAY_NAME.to_string(), |p| p.name.clone());

    let sent_at = message.timestamp.parse::<i64>().unwrap_or(0);

    debug!(message_id = %message.id, kind = %message.msg_type, "Parsed inbound message");

    Some(InboundMessage {
        message_id: message.id.clone(),
        sender: message.from.clone(),
        sent_at,
        kind: message.msg_type.clone(),
        text: message.text.as_ref().map(|t| t.body.clone()).unwrap_or_default(),
        display_name,
    })
}

/// Parser adapter over [`parse_message`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatsAppParser;

impl InboundParserPort for WhatsAppParser {
    fn parse(&self, event: &serde_json::Value) -> Option<InboundMessage> {
        parse_message(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message_event(text: &str) -> serde_json::Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "123",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "contacts": [{
                            "profile": {"name": "Asha"},
                            "wa_id": "5551234"
                        }],
                        "messages": [{
                            "from": "5551234",
                            "id": "wamid.m1",
                            "timestamp": "1700000000",
                            "type": "text",
                            "text": {"body": text}
                        }]
                    }
                }]
            }]
        })
    }

    #[test]
    fn parses_text_message() {
        let msg = parse_message(&message_event("Hello there")).unwrap();
        assert_eq!(msg.message_id, "wamid.m1");
        assert_eq!(msg.sender, "5551234");
        assert_eq!(msg.sent_at, 1_700_000_000);
        assert_eq!(msg.kind, "text");
        assert_eq!(msg.text, "Hello there");
        assert_eq!(msg.display_name, "Asha");
    }

    #[test]
    fn missing_contact_falls_back_to_unknown() {
        let mut event = message_event("hi");
        event["entry"][0]["changes"][0]["value"]["contacts"] = json!([]);
        let msg = parse_message(&event).unwrap();
        assert_eq!(msg.display_name, UNKNOWN_DISPLAY_NAME);
    }

    #[test]
    fn unparseable_timestamp_becomes_zero() {
        let mut event = message_event("hi");
        event["entry"][0]["changes"][0]["value"]["messages"][0]["timestamp"] = json!("not-a-number");
        let msg = parse_message(&event).unwrap();
        assert_eq!(msg.sent_at, 0);
    }

    #[test]
    fn non_text_message_has_empty_body() {
        let mut event = message_event("ignored");
        event["entry"][0]["changes"][0]["value"]["messages"][0]["type"] = json!("image");
        event["entry"][0]["changes"][0]["value"]["messages"][0]
            .as_object_mut()
            .unwrap()
            .remove("text");
        let msg = parse_message(&event).unwrap();
        assert_eq!(msg.kind, "image");
        assert!(msg.text.is_empty());
    }

    #[test]
    fn status_only_delivery_yields_none() {
        let event = json!({
            "entry": [{
                "changes": [{
                    "value": {
                        "statuses": [{"id": "wamid.m1", "status": "delivered"}]
                    }
                }]
            }]
        });
        assert!(parse_message(&event).is_none());
    }

    #[test]
    fn empty_entries_yield_none() {
        assert!(parse_message(&json!({"entry": []})).is_none());
        assert!(parse_message(&json!({})).is_none());
    }

    #[test]
    fn only_first_message_is_extracted() {
        let mut event = message_event("first");
        event["entry"][0]["changes"][0]["value"]["messages"]
            .as_array_mut()
            .unwrap()
            .push(json!({
                "from": "999",
                "id": "wamid.m2",
                "timestamp": "1700000001",
                "type": "text",
                "text": {"body": "second"}
            }));
        let msg = parse_message(&event).unwrap();
        assert_eq!(msg.text, "first");
    }

    #[test]
    fn parser_adapter_delegates() {
        let parser = WhatsAppParser;
        assert!(parser.parse(&message_event("hi")).is_some());
        assert!(parser.parse(&json!({})).is_none());
    }

    #[test]
    fn verify_signature_valid() {
        let secret = "test_secret";
        let payload = b"test payload";
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        let signature = format!("sha256={}", hex::encode(mac.finalize().into_bytes()));

        assert!(verify_signature(payload, &signature, secret));
    }

    #[test]
    fn verify_signature_invalid() {
        let wrong =
            "sha256=0000000000000000000000000000000000000000000000000000000000000000";
        assert!(!verify_signature(b"test payload", wrong, "test_secret"));
    }

    #[test]
    fn verify_signature_wrong_format() {
        assert!(!verify_signature(b"test", "invalid", "secret"));
        assert!(!verify_signature(b"test", "md5=abc", "secret"));
    }

    #[test]
    fn verify_signature_invalid_hex() {
        assert!(!verify_signature(b"test", "sha256=notahex", "secret"));
    }
}

//! Messaging channel configuration: WhatsApp Cloud API and Twilio SMS.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// WhatsApp Cloud API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Meta Graph API access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Phone number ID from WhatsApp Business
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// App secret for webhook signature verification (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub app_secret: Option<SecretString>,

    /// Verify token echoed back during the webhook subscription handshake
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Whether signature verification is required (default: false)
    #[serde(default)]
    pub signature_required: bool,

    /// Graph API version (default: v17.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("phone_number_id", &self.phone_number_id)
            .field(
                "app_secret",
                &if self.app_secret.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("verify_token", &self.verify_token)
            .field("signature_required", &self.signature_required)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn default_api_version() -> String {
    "v17.0".to_string()
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            app_secret: None,
            verify_token: None,
            signature_required: false,
            api_version: default_api_version(),
        }
    }
}

impl WhatsAppConfig {
    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Get the app secret as a string reference (for signature verification)
    #[must_use]
    pub fn app_secret_str(&self) -> Option<&str> {
        self.app_secret.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether the client has the credentials it needs to send
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.access_token_str().is_some_and(|t| !t.is_empty())
            && self.phone_number_id.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Twilio SMS configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub auth_token: Option<SecretString>,

    /// Sender phone number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,

    /// Shared token for inbound SMS webhook verification
    #[serde(default, skip_serializing)]
    pub webhook_token: Option<SecretString>,
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("account_sid", &self.account_sid)
            .field(
                "auth_token",
                &if self.auth_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("from_number", &self.from_number)
            .field(
                "webhook_token",
                &if self.webhook_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

impl SmsConfig {
    /// Get the auth token as a string reference (for API calls)
    #[must_use]
    pub fn auth_token_str(&self) -> Option<&str> {
        self.auth_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Get the webhook token as a string reference (for verification)
    #[must_use]
    pub fn webhook_token_str(&self) -> Option<&str> {
        self.webhook_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether the client has the credentials it needs to send
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.account_sid.as_deref().is_some_and(|s| !s.is_empty())
            && self.auth_token_str().is_some_and(|t| !t.is_empty())
            && self.from_number.as_deref().is_some_and(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whatsapp_debug_redacts_secrets() {
        let config = WhatsAppConfig {
            access_token: Some(SecretString::from("EAAG-token")),
            app_secret: Some(SecretString::from("app-secret")),
            ..WhatsAppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("EAAG-token"));
        assert!(!debug.contains("app-secret"));
    }

    #[test]
    fn whatsapp_defaults() {
        let config = WhatsAppConfig::default();
        assert_eq!(config.api_version, "v17.0");
        assert!(!config.signature_required);
        assert!(!config.is_configured());
    }

    #[test]
    fn whatsapp_configured_requires_token_and_phone_id() {
        let config = WhatsAppConfig {
            access_token: Some(SecretString::from("token")),
            phone_number_id: Some("123456".to_string()),
            ..WhatsAppConfig::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn sms_debug_redacts_auth_token() {
        let config = SmsConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: Some(SecretString::from("twilio-secret")),
            ..SmsConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("AC123"));
        assert!(!debug.contains("twilio-secret"));
    }

    #[test]
    fn sms_configured_requires_all_credentials() {
        let config = SmsConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: Some(SecretString::from("token")),
            from_number: None,
            webhook_token: None,
        };
        assert!(!config.is_configured());
    }
}

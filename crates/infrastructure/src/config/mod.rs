//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `security`: Admin authentication
//! - `messenger`: WhatsApp Cloud API and Twilio SMS credentials
//! - `alerts`: Broadcast recipients and emergency number

mod alerts;
mod messenger;
mod security;
mod server;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use alerts::AlertsConfig;
pub use messenger::{SmsConfig, WhatsAppConfig};
pub use security::SecurityConfig;
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls security validation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed security warnings
    #[default]
    Development,
    /// Production environment - strict security validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Channel used for admin broadcasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastChannel {
    /// Send broadcasts over the WhatsApp Cloud API (default)
    #[default]
    WhatsApp,
    /// Send broadcasts over Twilio SMS
    Sms,
}

impl fmt::Display for BroadcastChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WhatsApp => write!(f, "whatsapp"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Channel used for admin broadcasts
    #[serde(default)]
    pub broadcast_channel: BroadcastChannel,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Security configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// WhatsApp configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Twilio SMS configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Broadcast and reply configuration
    #[serde(default)]
    pub alerts: AlertsConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CARELINE_SERVER__PORT)
            .add_source(Self::env_source());

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Environment variable source with `CARELINE` prefix.
    ///
    /// Nesting uses a double underscore so multi-word keys keep their
    /// single underscores: `CARELINE_WHATSAPP__PHONE_NUMBER_ID` maps to
    /// `whatsapp.phone_number_id`.
    fn env_source() -> config::Environment {
        config::Environment::with_prefix("CARELINE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Resolved environment, defaulting to development
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Collect security warnings worth surfacing at startup.
    ///
    /// In production these should be treated as fatal by the caller.
    #[must_use]
    pub fn security_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.security.has_admin_key() {
            warnings.push(
                "security.admin_api_key is not set; admin endpoints will reject all requests"
                    .to_string(),
            );
        }
        if self.whatsapp.verify_token.as_deref().is_none_or(str::is_empty) {
            warnings.push(
                "whatsapp.verify_token is not set; the webhook handshake cannot complete"
                    .to_string(),
            );
        }
        if self.whatsapp.signature_required && self.whatsapp.app_secret_str().is_none() {
            warnings.push(
                "whatsapp.signature_required is set without whatsapp.app_secret; all webhook \
                 posts will be rejected"
                    .to_string(),
            );
        }
        if self.alerts.broadcast_recipients.is_empty() {
            warnings.push("alerts.broadcast_recipients is empty; broadcasts reach nobody".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(AppConfig::default().environment(), Environment::Development);
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_from_str_case_insensitive() {
        assert_eq!(
            "PRODUCTION".parse::<Environment>().unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn broadcast_channel_default_is_whatsapp() {
        assert_eq!(BroadcastChannel::default(), BroadcastChannel::WhatsApp);
        assert_eq!(format!("{}", BroadcastChannel::Sms), "sms");
    }

    #[test]
    fn default_config_reports_missing_credentials() {
        let warnings = AppConfig::default().security_warnings();
        assert!(warnings.iter().any(|w| w.contains("admin_api_key")));
        assert!(warnings.iter().any(|w| w.contains("verify_token")));
        assert!(warnings.iter().any(|w| w.contains("broadcast_recipients")));
    }

    #[test]
    fn configured_config_has_no_warnings() {
        let config = AppConfig {
            security: SecurityConfig {
                admin_api_key: Some(SecretString::from("admin-key")),
            },
            whatsapp: WhatsAppConfig {
                verify_token: Some("verify".to_string()),
                ..WhatsAppConfig::default()
            },
            alerts: AlertsConfig {
                broadcast_recipients: vec!["+15551234567".to_string()],
                ..AlertsConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.security_warnings().is_empty());
    }

    #[test]
    fn env_overrides_reach_multiword_nested_keys() {
        let mut vars = std::collections::HashMap::new();
        vars.insert(
            "CARELINE_WHATSAPP__PHONE_NUMBER_ID".to_string(),
            "123456789".to_string(),
        );
        vars.insert(
            "CARELINE_SECURITY__ADMIN_API_KEY".to_string(),
            "env-admin-key".to_string(),
        );
        vars.insert("CARELINE_BROADCAST_CHANNEL".to_string(), "sms".to_string());

        let config = config::Config::builder()
            .add_source(AppConfig::env_source().source(Some(vars)))
            .build()
            .unwrap();
        let app: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app.whatsapp.phone_number_id.as_deref(), Some("123456789"));
        assert_eq!(app.security.admin_api_key_str(), Some("env-admin-key"));
        assert_eq!(app.broadcast_channel, BroadcastChannel::Sms);
    }

    #[test]
    fn signature_required_without_secret_is_flagged() {
        let config = AppConfig {
            whatsapp: WhatsAppConfig {
                signature_required: true,
                ..WhatsAppConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(
            config
                .security_warnings()
                .iter()
                .any(|w| w.contains("app_secret"))
        );
    }
}

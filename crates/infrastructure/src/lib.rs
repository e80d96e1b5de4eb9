//! Infrastructure layer - configuration and adapters for the application ports
//!
//! Loads the runtime configuration from file and environment and provides
//! the configuration-backed recipient directory.

pub mod config;
pub mod directory;

pub use config::{
    AlertsConfig, AppConfig, BroadcastChannel, Environment, SecurityConfig, ServerConfig,
    SmsConfig, WhatsAppConfig,
};
pub use directory::StaticRecipientDirectory;

//! Security configuration: admin authentication.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Security configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret for the admin endpoints (sensitive - uses SecretString)
    ///
    /// Presented by clients in the `X-API-Key` header. When unset, admin
    /// endpoints reject every request.
    #[serde(default, skip_serializing)]
    pub admin_api_key: Option<SecretString>,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field(
                "admin_api_key",
                &if self.admin_api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

impl SecurityConfig {
    /// Get the admin API key as a string reference (for comparison)
    #[must_use]
    pub fn admin_api_key_str(&self) -> Option<&str> {
        self.admin_api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Check whether an admin key is configured
    #[must_use]
    pub fn has_admin_key(&self) -> bool {
        self.admin_api_key_str().is_some_and(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_admin_key() {
        let config = SecurityConfig {
            admin_api_key: Some(SecretString::from("super-secret")),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn empty_key_counts_as_unconfigured() {
        let config = SecurityConfig {
            admin_api_key: Some(SecretString::from("")),
        };
        assert!(!config.has_admin_key());
        assert!(!SecurityConfig::default().has_admin_key());
    }
}

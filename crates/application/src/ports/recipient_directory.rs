//! Recipient directory port
//!
//! Supplies the recipient set for admin broadcasts. Backed by static
//! configuration today; a persistence-backed user store is the expected
//! future implementation.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Source of broadcast recipient identifiers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecipientDirectoryPort: Send + Sync {
    /// All recipients an admin broadcast should fan out to
    async fn broadcast_recipients(&self) -> Result<Vec<String>, ApplicationError>;
}

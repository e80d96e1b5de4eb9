//! Configuration-backed recipient directory.

use application::error::ApplicationError;
use application::ports::RecipientDirectoryPort;
use async_trait::async_trait;
use tracing::debug;

/// Recipient directory backed by a static list from configuration.
///
/// Duplicates are dropped while preserving first-seen order, so one
/// recipient listed twice is never messaged twice per broadcast.
#[derive(Debug, Clone)]
pub struct StaticRecipientDirectory {
    recipients: Vec<String>,
}

impl StaticRecipientDirectory {
    /// Build a directory from configured recipients
    #[must_use]
    pub fn new(recipients: Vec<String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let recipients: Vec<String> = recipients
            .into_iter()
            .filter(|r| !r.trim().is_empty())
            .filter(|r| seen.insert(r.clone()))
            .collect();
        debug!(count = recipients.len(), "Loaded static recipient directory");
        Self { recipients }
    }

    /// Number of known recipients
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Whether the directory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}

#[async_trait]
impl RecipientDirectoryPort for StaticRecipientDirectory {
    async fn broadcast_recipients(&self) -> Result<Vec<String>, ApplicationError> {
        Ok(self.recipients.clone())
    }
}

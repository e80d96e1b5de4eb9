//! Application state shared across handlers

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use application::{AlertDispatcher, MessagePipeline};
use infrastructure::AppConfig;

/// Rolling counters surfaced by the admin stats endpoint
#[derive(Debug, Default)]
pub struct StatsCollector {
    messages_processed: AtomicU64,
    replies_sent: AtomicU64,
    alerts_sent: AtomicU64,
}

impl StatsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_message(&self, replied: bool) {
        self.messages_processed.fetch_add(1, Ordering::Relaxed);
        if replied {
            self.replies_sent.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_alerts(&self, delivered: u64) {
        self.alerts_sent.fetch_add(delivered, Ordering::Relaxed);
    }

    #[must_use]
    pub fn messages_processed(&self) -> u64 {
        self.messages_processed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn replies_sent(&self) -> u64 {
        self.replies_sent.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn alerts_sent(&self) -> u64 {
        self.alerts_sent.load(Ordering::Relaxed)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Inbound webhook pipeline
    pub pipeline: Arc<MessagePipeline>,
    /// Admin broadcast dispatcher, absent when no channel is configured
    pub dispatcher: Option<Arc<AlertDispatcher>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Request counters for the stats endpoint
    pub stats: Arc<StatsCollector>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("dispatcher", &self.dispatcher.is_some())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_collector_counts() {
        let stats = StatsCollector::new();
        stats.record_message(true);
        stats.record_message(false);
        stats.record_alerts(3);

        assert_eq!(stats.messages_processed(), 2);
        assert_eq!(stats.replies_sent(), 1);
        assert_eq!(stats.alerts_sent(), 3);
    }
}

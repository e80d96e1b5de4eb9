//! Application services

pub mod alert_dispatcher;
pub mod message_pipeline;
pub mod reply_catalog;

pub use alert_dispatcher::{AlertDispatcher, BroadcastRetryPolicy, RecipientDelivery};
pub use message_pipeline::{MessagePipeline, PipelineReport};
pub use reply_catalog::{Intent, ReplyCatalog};

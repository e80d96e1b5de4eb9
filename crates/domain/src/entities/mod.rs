//! Domain entities

pub mod alert;
pub mod inbound_message;

pub use alert::{AlertPriority, AlertRequest, AlertType};
pub use inbound_message::{InboundMessage, UNKNOWN_DISPLAY_NAME};

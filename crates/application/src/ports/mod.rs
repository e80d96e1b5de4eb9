//! Port definitions - trait seams implemented by integration adapters

pub mod inbound_parser;
pub mod message_gateway;
pub mod recipient_directory;

pub use inbound_parser::InboundParserPort;
pub use message_gateway::MessageGatewayPort;
pub use recipient_directory::RecipientDirectoryPort;

#[cfg(test)]
pub use inbound_parser::MockInboundParserPort;
#[cfg(test)]
pub use message_gateway::MockMessageGatewayPort;
#[cfg(test)]
pub use recipient_directory::MockRecipientDirectoryPort;

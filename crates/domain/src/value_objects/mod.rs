//! Domain value objects

pub mod delivery_outcome;
pub mod recipient;

pub use delivery_outcome::DeliveryOutcome;
pub use recipient::mask_recipient;

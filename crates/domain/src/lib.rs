//! Domain layer for Careline
//!
//! Contains the core message and alert types, delivery outcomes, and domain
//! errors. This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

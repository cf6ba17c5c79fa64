//! Core types for the Bazaar marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod language;
pub mod phone;
pub mod postal;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use language::Language;
pub use phone::{PhoneError, PhoneNumber};
pub use postal::{PostalCode, PostalCodeError};
pub use price::{CurrencyCode, Price};
pub use status::*;

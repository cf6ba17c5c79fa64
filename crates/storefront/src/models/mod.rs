//! Domain models for storefront session state.

pub mod cart;
pub mod lists;
pub mod session;

pub use session::keys as session_keys;

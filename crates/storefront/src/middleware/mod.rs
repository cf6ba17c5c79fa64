//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, trace transactions)
//! 2. CORS for the SPA shell
//! 3. `TraceLayer` (request logging)
//! 4. Request correlation IDs
//! 5. Session layer (tower-sessions with the in-memory store)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{AuthRejection, OptionalUser, RequireAdmin, RequireSeller, RequireUser};
pub use request_id::request_id;
pub use session::create_session_layer;

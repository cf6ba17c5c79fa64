//! Session-related types.
//!
//! Everything the storefront remembers between requests lives in the session:
//! the signed-in user, the cart, checkout progress, favorites, comparison
//! picks, language, and undelivered notices.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use bazaar_core::{Language, UserId, UserRole};

/// Session-stored user identity.
///
/// Carries the backend bearer token so the storefront can call
/// user-scoped endpoints on the buyer's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's backend ID.
    pub id: UserId,
    /// User's email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Account role.
    pub role: UserRole,
    /// Bearer token issued by the backend at login.
    pub access_token: String,
}

/// Severity of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One-shot notification queued for the next page view.
///
/// Notices accumulate across redirects and are drained exactly once by
/// [`take_notices`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Session keys for storefront state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for in-progress checkout state.
    pub const CHECKOUT: &str = "checkout";

    /// Key for favorited product IDs.
    pub const FAVORITES: &str = "favorites";

    /// Key for product IDs picked for comparison.
    pub const COMPARISON: &str = "comparison";

    /// Key for the selected interface language.
    pub const LANGUAGE: &str = "language";

    /// Key for queued flash notices.
    pub const NOTICES: &str = "notices";
}

/// Get the signed-in user from the session.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user.clone()).await
}

/// Remove the signed-in user from the session.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(keys::CURRENT_USER)
        .await
        .map(|_| ())
}

/// Get the selected interface language, defaulting to Ukrainian.
pub async fn language(session: &Session) -> Language {
    session
        .get::<Language>(keys::LANGUAGE)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the selected interface language.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn set_language(
    session: &Session,
    language: Language,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LANGUAGE, language).await
}

/// Queue a flash notice for the next page view.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn push_notice(
    session: &Session,
    notice: Notice,
) -> Result<(), tower_sessions::session::Error> {
    let mut notices = session
        .get::<Vec<Notice>>(keys::NOTICES)
        .await?
        .unwrap_or_default();
    notices.push(notice);
    session.insert(keys::NOTICES, notices).await
}

/// Drain all queued flash notices.
///
/// Returns an empty list when nothing is queued; notices are delivered
/// at most once.
pub async fn take_notices(session: &Session) -> Vec<Notice> {
    session
        .remove::<Vec<Notice>>(keys::NOTICES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

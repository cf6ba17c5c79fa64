//! Authentication extractors.
//!
//! Handlers take one of these extractors to require (or optionally read)
//! the logged-in marketplace user stored in the session.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use bazaar_core::UserRole;

use crate::models::session::CurrentUser;
use crate::models::session_keys;

/// Rejection for the auth extractors.
pub enum AuthRejection {
    /// Send the visitor to the login page.
    RedirectToLogin,
    /// Logged in but lacking the required role; back to the home page.
    RedirectHome,
    /// Unauthorized response for programmatic requests.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectHome => Redirect::to("/").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

async fn user_from_parts(parts: &Parts) -> Result<CurrentUser, AuthRejection> {
    // Session is placed in extensions by SessionManagerLayer
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| {
            if parts.uri.path().starts_with("/api/") {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            }
        })
}

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.full_name)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(user_from_parts(parts).await?))
    }
}

/// Extractor that requires a logged-in user with the `seller` role.
pub struct RequireSeller(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = user_from_parts(parts).await?;
        if user.role != UserRole::Seller {
            return Err(AuthRejection::RedirectHome);
        }
        Ok(Self(user))
    }
}

/// Extractor that requires a logged-in user with the `admin` role.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = user_from_parts(parts).await?;
        if user.role != UserRole::Admin {
            return Err(AuthRejection::RedirectHome);
        }
        Ok(Self(user))
    }
}

/// Extractor that optionally reads the current user.
///
/// Unlike [`RequireUser`] this never rejects; guests get `None`.
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

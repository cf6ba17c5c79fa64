//! Authentication route handlers.
//!
//! Login and registration proxy the backend auth endpoints, stash the
//! bearer token in the session, and land the account on its role's home
//! page. Failures follow post/redirect/get with a localized notice.

use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::UserRole;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::i18n::{Msg, text};
use crate::marketplace::MarketplaceError;
use crate::marketplace::types::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::session::{self, CurrentUser, Notice};
use crate::routes::PageMeta;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
    pub company_name: Option<String>,
}

// =============================================================================
// Pages
// =============================================================================

/// Login page view model.
#[derive(Debug, Serialize)]
pub struct LoginPageView {
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// Display the login page.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Json<LoginPageView> {
    Json(LoginPageView {
        meta: PageMeta::load(&session).await,
    })
}

/// Registration page view model.
#[derive(Debug, Serialize)]
pub struct RegisterPageView {
    #[serde(flatten)]
    pub meta: PageMeta,
    /// Account role the form starts on.
    pub role: UserRole,
}

/// Query parameters for the registration page.
#[derive(Debug, Deserialize)]
pub struct RegisterPageQuery {
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Display the registration page, optionally seeded with a role.
#[instrument(skip(session))]
pub async fn register_page(
    session: Session,
    Query(query): Query<RegisterPageQuery>,
) -> Json<RegisterPageView> {
    Json(RegisterPageView {
        meta: PageMeta::load(&session).await,
        role: query.role.unwrap_or_default(),
    })
}

// =============================================================================
// Actions
// =============================================================================

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let language = session::language(&session).await;

    let credentials = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    match state.marketplace().login(&credentials).await {
        Ok(auth) => Ok(establish_session(&session, auth).await?.into_response()),
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            let msg = match &e {
                MarketplaceError::Api { status: 401, .. } => Msg::InvalidCredentials,
                MarketplaceError::Api { status: 404, .. } => Msg::UserNotFound,
                MarketplaceError::Api { .. } => Msg::LoginFailed,
                MarketplaceError::Http(_) | MarketplaceError::Parse(_) => {
                    Msg::ServerConnectionError
                }
            };
            session::push_notice(&session, Notice::error(text(language, msg))).await?;
            Ok(Redirect::to("/login").into_response())
        }
    }
}

/// Handle registration form submission.
///
/// A successful registration signs the account in immediately.
#[instrument(skip(state, session, form), fields(email = %form.email, role = %form.role))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let language = session::language(&session).await;

    let request = RegisterRequest {
        email: form.email.trim().to_string(),
        password: form.password,
        full_name: form.full_name.trim().to_string(),
        role: form.role,
        company_name: form
            .company_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    };

    match state.marketplace().register(&request).await {
        Ok(auth) => Ok(establish_session(&session, auth).await?.into_response()),
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            let msg = match &e {
                MarketplaceError::Api { status: 409, .. } => Msg::EmailTaken,
                MarketplaceError::Api { .. } => Msg::RegistrationFailed,
                MarketplaceError::Http(_) | MarketplaceError::Parse(_) => {
                    Msg::ServerConnectionError
                }
            };
            session::push_notice(&session, Notice::error(text(language, msg))).await?;
            Ok(Redirect::to("/register").into_response())
        }
    }
}

/// Store the authenticated account and send it to its home page.
async fn establish_session(session: &Session, auth: AuthResponse) -> Result<Redirect> {
    let user = CurrentUser {
        id: auth.user.id,
        email: auth.user.email,
        full_name: auth.user.full_name,
        role: auth.user.role,
        access_token: auth.access_token,
    };
    session::set_current_user(session, &user).await?;
    set_sentry_user(&user.id, Some(&user.email));

    Ok(Redirect::to(user.role.home_route()))
}

/// Handle logout. Drops the identity; the cart and the rest of the
/// session survive.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    let language = session::language(&session).await;

    session::clear_current_user(&session).await?;
    clear_sentry_user();

    session::push_notice(&session, Notice::info(text(language, Msg::LoggedOut))).await?;
    Ok(Redirect::to("/"))
}

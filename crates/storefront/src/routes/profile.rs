//! Account page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::marketplace::types::{AuthUser, Order};
use crate::middleware::RequireUser;
use crate::routes::PageMeta;
use crate::state::AppState;

/// Account page view model: the saved profile plus order history.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub profile: AuthUser,
    pub orders: Vec<Order>,
}

/// Display the account page.
///
/// The order list degrades to empty; the profile itself must load.
#[instrument(skip(state, session, user), fields(user_id = %user.0.id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    user: RequireUser,
) -> Result<Json<ProfileView>> {
    let token = user.0.access_token.as_str();

    let profile = state.marketplace().current_user(token).await?;
    let orders = state
        .marketplace()
        .list_my_orders(token)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch order history: {e}");
            Vec::new()
        });

    Ok(Json(ProfileView {
        meta: PageMeta::load(&session).await,
        profile,
        orders,
    }))
}

//! Admin panel route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::marketplace::types::AdminStats;
use crate::middleware::RequireAdmin;
use crate::routes::PageMeta;
use crate::state::AppState;

/// Admin panel view model.
#[derive(Debug, Serialize)]
pub struct AdminView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub stats: AdminStats,
}

/// Display the marketplace-wide stats panel.
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.id))]
pub async fn panel(
    State(state): State<AppState>,
    session: Session,
    admin: RequireAdmin,
) -> Result<Json<AdminView>> {
    let stats = state
        .marketplace()
        .admin_stats(admin.0.access_token.as_str())
        .await?;

    Ok(Json(AdminView {
        meta: PageMeta::load(&session).await,
        stats,
    }))
}

//! Seller dashboard route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::marketplace::types::{Product, SellerStats};
use crate::middleware::RequireSeller;
use crate::routes::PageMeta;
use crate::state::AppState;

/// Seller dashboard view model.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub stats: SellerStats,
    pub products: Vec<Product>,
}

/// Display the seller dashboard.
#[instrument(skip(state, session, seller), fields(user_id = %seller.0.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    seller: RequireSeller,
) -> Result<Json<DashboardView>> {
    let token = seller.0.access_token.as_str();

    let stats = state.marketplace().seller_stats(token).await?;
    let products = state
        .marketplace()
        .seller_products(token)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch seller products: {e}");
            Vec::new()
        });

    Ok(Json(DashboardView {
        meta: PageMeta::load(&session).await,
        stats,
        products,
    }))
}

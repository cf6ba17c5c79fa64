//! Favorites route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::ProductId;

use crate::error::Result;
use crate::models::lists;
use crate::routes::PageMeta;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Favorites page view model.
#[derive(Debug, Serialize)]
pub struct FavoritesView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub products: Vec<ProductCardView>,
}

/// Result of a list toggle.
#[derive(Debug, Serialize)]
pub struct ToggleView {
    pub product_id: ProductId,
    /// Whether the product is on the list after the toggle.
    pub active: bool,
    /// List size after the toggle.
    pub count: usize,
}

/// Display the favorites page.
///
/// Products that have since left the catalog are dropped silently.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<Json<FavoritesView>> {
    let ids = lists::favorites(&session).await;

    let mut products = Vec::with_capacity(ids.len());
    for id in &ids {
        match state.marketplace().get_product(id).await {
            Ok(Some(product)) => products.push(ProductCardView::from(&product)),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to fetch favorite {id}: {e}"),
        }
    }

    Ok(Json(FavoritesView {
        meta: PageMeta::load(&session).await,
        products,
    }))
}

/// Toggle a product on the favorites list.
#[instrument(skip(session), fields(product_id = %product_id))]
pub async fn toggle(
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ToggleView>> {
    let active = lists::toggle_favorite(&session, &product_id).await?;
    let count = lists::favorites(&session).await.len();

    Ok(Json(ToggleView {
        product_id,
        active,
        count,
    }))
}

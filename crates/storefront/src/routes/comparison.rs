//! Comparison route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::ProductId;

use crate::error::Result;
use crate::marketplace::types::Product;
use crate::models::lists;
use crate::routes::PageMeta;
use crate::routes::favorites::ToggleView;
use crate::state::AppState;

/// Comparison page view model.
///
/// Carries full product records rather than cards so the client can lay
/// the specs out side by side.
#[derive(Debug, Serialize)]
pub struct ComparisonView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub products: Vec<Product>,
}

/// Display the comparison page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ComparisonView>> {
    let ids = lists::comparison(&session).await;

    let mut products = Vec::with_capacity(ids.len());
    for id in &ids {
        match state.marketplace().get_product(id).await {
            Ok(Some(product)) => products.push(product),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to fetch comparison pick {id}: {e}"),
        }
    }

    Ok(Json(ComparisonView {
        meta: PageMeta::load(&session).await,
        products,
    }))
}

/// Toggle a product on the comparison list.
#[instrument(skip(session), fields(product_id = %product_id))]
pub async fn toggle(
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ToggleView>> {
    let active = lists::toggle_comparison(&session, &product_id).await?;
    let count = lists::comparison(&session).await.len();

    Ok(Json(ToggleView {
        product_id,
        active,
        count,
    }))
}

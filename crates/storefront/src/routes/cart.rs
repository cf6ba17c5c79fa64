//! Cart route handlers.
//!
//! The cart lives entirely in the session. Mutations return the updated
//! cart view so the client shell can re-render without a second fetch.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::cart::{Cart, CartLine, get_cart, save_cart};
use crate::routes::PageMeta;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// One cart line as shown to the client.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            title: line.title.clone(),
            price: line.price,
            quantity: line.quantity,
            line_total: line.price * Decimal::from(line.quantity),
            image: line.image.clone(),
        }
    }
}

/// Cart page view model.
#[derive(Debug, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub items: Vec<CartItemView>,
    pub subtotal: Decimal,
    pub item_count: u32,
}

impl CartView {
    async fn build(session: &Session, cart: &Cart) -> Self {
        Self {
            meta: PageMeta::load(session).await,
            items: cart.items.iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal(),
            item_count: cart.count(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
///
/// Titles and images are refreshed from the catalog when available; prices
/// stay as snapshotted at add time.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await;

    let mut refreshed = false;
    for line in &mut cart.items {
        match state.marketplace().get_product(&line.product_id).await {
            Ok(Some(product)) => {
                if line.title != product.title {
                    line.title = product.title;
                    refreshed = true;
                }
                let image = product.images.first().cloned();
                if line.image != image {
                    line.image = image;
                    refreshed = true;
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to refresh cart line {}: {e}", line.product_id);
            }
        }
    }
    if refreshed {
        save_cart(&session, &cart).await?;
    }

    Ok(Json(CartView::build(&session, &cart).await))
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Add a product to the cart.
#[instrument(skip(state, session), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .marketplace()
        .get_product(&request.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", request.product_id)))?;

    let mut cart = get_cart(&session).await;
    cart.add(CartLine {
        product_id: product.id,
        title: product.title,
        price: product.price,
        quantity: request.quantity.max(1),
        image: product.images.first().cloned(),
        seller_id: product.seller_id,
    });
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&session, &cart).await))
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(session), fields(product_id = %product_id))]
pub async fn set_quantity(
    session: Session,
    Path(product_id): Path<ProductId>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await;
    cart.set_quantity(&product_id, request.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&session, &cart).await))
}

/// Remove a line from the cart.
#[instrument(skip(session), fields(product_id = %product_id))]
pub async fn remove(
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let mut cart = get_cart(&session).await;
    cart.remove(&product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::build(&session, &cart).await))
}

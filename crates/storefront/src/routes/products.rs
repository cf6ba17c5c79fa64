//! Catalog route handlers: listing, product detail, search suggestions.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::{CategoryId, ProductId};

use crate::error::{AppError, Result};
use crate::marketplace::types::{Category, Product, ProductQuery, SearchSuggestion};
use crate::models::lists;
use crate::routes::PageMeta;
use crate::state::AppState;

/// Suggestion count returned by the typeahead endpoint.
const SUGGESTION_LIMIT: u32 = 5;

// =============================================================================
// View Models
// =============================================================================

/// Product card for listing grids.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Decimal>,
    /// Cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
    pub is_bestseller: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            compare_price: product.compare_price,
            image: product.images.first().cloned(),
            rating: product.rating,
            reviews_count: product.reviews_count,
            is_bestseller: product.is_bestseller,
        }
    }
}

/// Catalog listing page view model.
#[derive(Debug, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<Category>,
    /// Filters the listing was built with, echoed for the client shell.
    pub applied: ListingQuery,
}

/// Product detail page view model.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub product: Product,
    pub is_favorite: bool,
    pub in_comparison: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Query parameters accepted by the listing page.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

/// Display the catalog listing.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingView>> {
    let products = state
        .marketplace()
        .list_products(&ProductQuery {
            search: query.search.clone(),
            category_id: query.category.clone(),
            sort_by: query.sort_by.clone(),
            limit: query.limit,
            skip: query.skip,
        })
        .await?;

    // The filter sidebar degrades to empty rather than failing the page
    let categories = state
        .marketplace()
        .list_categories()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch categories: {e}");
            Vec::new()
        });

    Ok(Json(ListingView {
        meta: PageMeta::load(&session).await,
        products: products.iter().map(ProductCardView::from).collect(),
        categories,
        applied: query,
    }))
}

/// Display a product detail page.
#[instrument(skip(state, session), fields(product_id = %product_id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ProductDetailView>> {
    let product = state
        .marketplace()
        .get_product(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id} not found")))?;

    let is_favorite = lists::favorites(&session).await.contains(&product.id);
    let in_comparison = lists::comparison(&session).await.contains(&product.id);

    Ok(Json(ProductDetailView {
        meta: PageMeta::load(&session).await,
        product,
        is_favorite,
        in_comparison,
    }))
}

/// Query parameters for the typeahead endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

/// Search-bar typeahead suggestions.
///
/// Queries shorter than two characters answer with an empty list without
/// touching the backend.
#[instrument(skip(state))]
pub async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<SearchSuggestion>>> {
    let limit = query.limit.unwrap_or(SUGGESTION_LIMIT);
    let suggestions = state
        .marketplace()
        .search_suggestions(query.q.trim(), limit)
        .await?;
    Ok(Json(suggestions))
}

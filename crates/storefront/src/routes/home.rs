//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::marketplace::types::{Category, CustomSection, ProductQuery};
use crate::routes::PageMeta;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// How many products the featured rail shows.
const FEATURED_LIMIT: u32 = 12;

/// Bestseller rail falls back to this many products when nothing is flagged.
const BESTSELLER_FALLBACK: usize = 8;

// =============================================================================
// View Models
// =============================================================================

/// Merchandising section sourced from the backend.
#[derive(Debug, Serialize)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub products: Vec<ProductCardView>,
}

impl From<&CustomSection> for SectionView {
    fn from(section: &CustomSection) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            products: section.products.iter().map(ProductCardView::from).collect(),
        }
    }
}

/// Home page view model.
#[derive(Debug, Serialize)]
pub struct HomeView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub categories: Vec<Category>,
    pub popular_categories: Vec<Category>,
    pub featured_products: Vec<ProductCardView>,
    pub bestsellers: Vec<ProductCardView>,
    pub custom_sections: Vec<SectionView>,
}

// =============================================================================
// Handler
// =============================================================================

/// Render the home page.
///
/// Every block degrades to empty on backend failure so one broken endpoint
/// does not blank the whole page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Json<HomeView>> {
    let categories = state
        .marketplace()
        .list_categories()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch categories: {e}");
            Vec::new()
        });

    let popular_categories = state
        .marketplace()
        .popular_categories()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch popular categories: {e}");
            Vec::new()
        });

    let featured = state
        .marketplace()
        .list_products(&ProductQuery {
            sort_by: Some("popularity".to_string()),
            limit: Some(FEATURED_LIMIT),
            ..ProductQuery::default()
        })
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch featured products: {e}");
            Vec::new()
        });

    // Flagged bestsellers first; an unflagged catalog still fills the rail.
    let mut bestsellers: Vec<ProductCardView> = featured
        .iter()
        .filter(|p| p.is_bestseller)
        .map(ProductCardView::from)
        .collect();
    if bestsellers.is_empty() {
        bestsellers = featured
            .iter()
            .take(BESTSELLER_FALLBACK)
            .map(ProductCardView::from)
            .collect();
    }

    let custom_sections = state
        .marketplace()
        .custom_sections()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch custom sections: {e}");
            Vec::new()
        });

    Ok(Json(HomeView {
        meta: PageMeta::load(&session).await,
        categories,
        popular_categories,
        featured_products: featured.iter().map(ProductCardView::from).collect(),
        bestsellers,
        custom_sections: custom_sections.iter().map(SectionView::from).collect(),
    }))
}

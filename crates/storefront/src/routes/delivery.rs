//! Nova Poshta lookup route handlers.
//!
//! Thin pass-throughs over the backend delivery endpoints; the client
//! already debounces, caps, and caches the typeahead traffic.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use bazaar_core::CityRef;

use crate::error::Result;
use crate::marketplace::types::{CitySuggestion, Warehouse};
use crate::state::AppState;

/// Default row cap for the city typeahead.
const CITY_LIMIT: u32 = 10;

/// Query parameters for the city lookup.
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub query: String,
    pub limit: Option<u32>,
}

/// Settlement typeahead for the Nova Poshta sub-form.
#[instrument(skip(state))]
pub async fn cities(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<Vec<CitySuggestion>>> {
    let limit = query.limit.unwrap_or(CITY_LIMIT);
    let cities = state
        .marketplace()
        .search_cities(query.query.trim(), limit)
        .await?;
    Ok(Json(cities))
}

/// Query parameters for the branch list.
#[derive(Debug, Deserialize)]
pub struct WarehouseQuery {
    pub city_ref: CityRef,
    /// Optional branch-number filter.
    pub number: Option<String>,
}

/// Branches of the chosen settlement.
#[instrument(skip(state), fields(city_ref = %query.city_ref))]
pub async fn warehouses(
    State(state): State<AppState>,
    Query(query): Query<WarehouseQuery>,
) -> Result<Json<Vec<Warehouse>>> {
    let warehouses = state
        .marketplace()
        .list_warehouses(&query.city_ref, query.number.as_deref())
        .await?;
    Ok(Json(warehouses))
}

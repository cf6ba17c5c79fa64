//! Cache types for marketplace API responses.

use crate::marketplace::types::{
    Category, CitySuggestion, CustomSection, PopularCategory, Product, Warehouse,
};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
    PopularCategories(Vec<PopularCategory>),
    Sections(Vec<CustomSection>),
    Cities(Vec<CitySuggestion>),
    Warehouses(Vec<Warehouse>),
}

//! Domain types for the marketplace backend API.
//!
//! These mirror the backend's JSON contract. Response types tolerate missing
//! optional fields so catalog records from older backend revisions still parse.

use bazaar_core::{
    CategoryId, CityRef, DeliveryMethod, OrderId, OrderStatus, PaymentMethod, PaymentStatus,
    ProductId, SellerId, UserId, UserRole, WarehouseRef,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Types
// =============================================================================

/// Product listing as returned by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Pre-discount price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Decimal>,
    /// Short teaser shown on product cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Full description shown on the product page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category the product belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Denormalized category name for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Seller who listed the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    /// Average review rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews behind the rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
    /// Whether the product carries the bestseller badge.
    #[serde(default)]
    pub is_bestseller: bool,
    /// Free-form specification table, shape varies per category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<serde_json::Value>,
}

/// Catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Backend category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Icon identifier for the category tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Number of products in the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
}

/// Curated category highlighted on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularCategory {
    /// Backend category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Tile image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Number of products in the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
}

/// Merchandised product strip configured by the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomSection {
    /// Section ID.
    pub id: String,
    /// Heading shown above the strip.
    pub title: String,
    /// Products in display order.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Typeahead suggestion from the product search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSuggestion {
    /// Product ID the suggestion resolves to.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price, when the index carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// Query parameters for the product listing endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductQuery {
    /// Full-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Restrict to one category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Sort key understood by the backend (e.g. `popularity`, `price_asc`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Offset for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

// =============================================================================
// Auth Types
// =============================================================================

/// Credentials for the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for the registration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Requested account role, `customer` or `seller`.
    pub role: UserRole,
    /// Company name, collected for seller accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Account record as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Backend user ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Account role.
    #[serde(default)]
    pub role: UserRole,
    /// Company name for seller accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Saved contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Saved delivery city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Saved street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Saved postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Saved delivery method preference, raw backend value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<String>,
    /// Saved Nova Poshta branch description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub np_department: Option<String>,
}

/// Successful login/registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token scheme, `bearer`.
    #[serde(default)]
    pub token_type: String,
    /// The authenticated account.
    pub user: AuthUser,
}

// =============================================================================
// Order Types
// =============================================================================

/// One order line, snapshotted from the cart at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub price: Decimal,
    pub seller_id: SellerId,
}

/// Shipping destination.
///
/// For Nova Poshta orders `street` carries the branch address and the
/// warehouse fields identify the branch; postal code stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_ref: Option<WarehouseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_number: Option<String>,
}

/// Order-creation payload POSTed to the backend.
///
/// The backend becomes the authoritative owner of the order once this is
/// accepted; the storefront only reads it back afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Client-generated `ORDER-<millis>` identifier.
    pub order_number: String,
    /// Buyer account ID, or `guest` for anonymous checkout.
    pub buyer_id: String,
    pub items: Vec<OrderItem>,
    /// Item subtotal plus delivery price.
    pub total_amount: Decimal,
    pub currency: String,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}

/// Order resource as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Backend order ID.
    pub id: OrderId,
    /// Client-generated order number.
    pub order_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

// =============================================================================
// Payment Types
// =============================================================================

/// Buyer contact details forwarded to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCustomer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Request to open a hosted payment session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSessionRequest {
    /// Order number, doubles as the provider-side external ID.
    pub external_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub customer: PaymentCustomer,
    /// Human-readable statement line.
    pub description: String,
}

/// Redirect action returned by the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAction {
    /// Hosted checkout URL the buyer must be sent to.
    pub value: String,
}

/// Hosted payment session response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<PaymentAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Delivery Lookup Types
// =============================================================================

/// City returned by the Nova Poshta settlement search proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySuggestion {
    /// Settlement ref used for warehouse lookups.
    #[serde(rename = "ref")]
    pub city_ref: CityRef,
    /// Display name, e.g. `м. Київ, Київська обл.`.
    pub name: String,
    /// Ref of the delivery city when it differs from the settlement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_city: Option<String>,
}

/// Nova Poshta branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// Branch ref.
    #[serde(rename = "ref")]
    pub warehouse_ref: WarehouseRef,
    /// Branch number as printed on signage.
    pub number: String,
    /// Full branch description, used as the street line on orders.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_address: Option<String>,
}

// =============================================================================
// Dashboard Types
// =============================================================================

/// Aggregates for the seller dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerStats {
    #[serde(default)]
    pub total_products: u32,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub pending_orders: u32,
    #[serde(default)]
    pub revenue: Decimal,
}

/// Aggregates for the admin panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u32,
    #[serde(default)]
    pub total_sellers: u32,
    #[serde(default)]
    pub total_products: u32,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub revenue: Decimal,
}

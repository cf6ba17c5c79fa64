//! Session-owned shopping cart.
//!
//! The cart lives in the buyer's session until checkout clears it. Lines
//! snapshot title/price/seller at add time so cart math never depends on a
//! catalog fetch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use bazaar_core::{ProductId, SellerId};

use crate::marketplace::types::OrderItem;
use crate::models::session_keys;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
    /// Cover image for cart display.
    pub image: Option<String>,
    /// Seller who listed the product, when the catalog record carried one.
    pub seller_id: Option<SellerId>,
}

/// Shopping cart contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
}

impl Cart {
    /// Add a line, merging quantities when the product is already present.
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == line.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.items.push(line);
        }
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            item.quantity = quantity;
        }
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Item subtotal, before delivery.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }

    /// Snapshot the cart as order lines.
    ///
    /// Lines without a known seller are attributed to `unknown`, matching
    /// what the backend expects for legacy catalog records.
    #[must_use]
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                title: item.title.clone(),
                quantity: item.quantity,
                price: item.price,
                seller_id: item
                    .seller_id
                    .clone()
                    .unwrap_or_else(|| SellerId::from("unknown")),
            })
            .collect()
    }
}

/// Load the cart from the session, empty if absent.
pub async fn get_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart to the session.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart.clone()).await
}

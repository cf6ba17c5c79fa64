//! Checkout domain: form state, validation, pricing and order placement.
//!
//! The whole checkout lives in the session so a buyer can leave the page
//! and come back without losing the form. Placing an order runs the
//! two-step saga in [`saga`]; the summary panel prices come from the
//! option tables here.

pub mod saga;
pub mod session;
pub mod validate;

pub use saga::{OrderSaga, SagaError, SagaOutcome};
pub use session::{
    clear_checkout, get_checkout, save_checkout, CheckoutPhase, CheckoutState,
    NovaPoshtaSelection, PlacedOrder, RecipientForm, SelectedWarehouse,
};
pub use validate::validate;

use rust_decimal::Decimal;
use serde::Serialize;

use bazaar_core::{DeliveryMethod, Language, OrderStatus, PaymentMethod, PaymentStatus, UserId};

use crate::i18n::{self, Msg};
use crate::marketplace::types::{OrderPayload, PaymentCustomer, ShippingAddress};
use crate::models::cart::Cart;

/// Flat courier tariff in hryvnia.
const COURIER_PRICE: i64 = 149;
/// Flat Nova Poshta branch tariff in hryvnia.
const NOVA_POSHTA_PRICE: i64 = 72;

// ===== Option Tables =====

/// Delivery choice presented on the checkout page.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOption {
    pub method: DeliveryMethod,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Decimal,
    /// Caption under a non-zero price, e.g. the SMART free note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    /// Always rendered as free, even once carrier tariffs change.
    pub free: bool,
}

/// Payment choice presented on the checkout page.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub disabled: bool,
}

/// The delivery methods offered at checkout, localized.
#[must_use]
pub fn delivery_options(language: Language) -> Vec<DeliveryOption> {
    vec![
        DeliveryOption {
            method: DeliveryMethod::SelfPickup,
            name: i18n::text(language, Msg::SelfPickup),
            description: i18n::text(language, Msg::SelfPickupDesc),
            price: Decimal::ZERO,
            note: None,
            free: false,
        },
        DeliveryOption {
            method: DeliveryMethod::Courier,
            name: i18n::text(language, Msg::CourierDelivery),
            description: i18n::text(language, Msg::CourierDesc),
            price: delivery_price(DeliveryMethod::Courier),
            note: Some(i18n::text(language, Msg::SmartFreeNote)),
            free: false,
        },
        DeliveryOption {
            method: DeliveryMethod::NovaPoshta,
            name: i18n::text(language, Msg::NovaPoshtaPickup),
            description: i18n::text(language, Msg::NovaPoshtaDesc),
            price: delivery_price(DeliveryMethod::NovaPoshta),
            note: None,
            free: false,
        },
        DeliveryOption {
            method: DeliveryMethod::Ukrposhta,
            name: i18n::text(language, Msg::UkrposhtaPickup),
            description: i18n::text(language, Msg::UkrposhtaDesc),
            price: Decimal::ZERO,
            note: None,
            free: true,
        },
    ]
}

/// The payment methods offered at checkout, localized.
///
/// The Bazaar card option is advertised but not yet live; selecting it is
/// rejected server-side as well, see [`is_payment_disabled`].
#[must_use]
pub fn payment_options(language: Language) -> Vec<PaymentOption> {
    vec![
        PaymentOption {
            method: PaymentMethod::OnDelivery,
            name: i18n::text(language, Msg::PayOnDelivery),
            description: i18n::text(language, Msg::PayOnDeliveryDesc),
            badge: None,
            disabled: false,
        },
        PaymentOption {
            method: PaymentMethod::Online,
            name: i18n::text(language, Msg::PayOnlineRozetka),
            description: i18n::text(language, Msg::PayOnlineDesc),
            badge: None,
            disabled: false,
        },
        PaymentOption {
            method: PaymentMethod::CardRozetka,
            name: i18n::text(language, Msg::PayWithBazaarCard),
            description: i18n::text(language, Msg::PayWithBazaarCardDesc),
            badge: Some(i18n::text(language, Msg::DiscountBadge)),
            disabled: true,
        },
    ]
}

/// Whether a payment method is advertised but not selectable.
#[must_use]
pub const fn is_payment_disabled(method: PaymentMethod) -> bool {
    matches!(method, PaymentMethod::CardRozetka)
}

// ===== Pricing =====

/// Flat delivery tariff for a method, in hryvnia.
#[must_use]
pub fn delivery_price(method: DeliveryMethod) -> Decimal {
    match method {
        DeliveryMethod::SelfPickup | DeliveryMethod::Ukrposhta => Decimal::ZERO,
        DeliveryMethod::Courier => Decimal::from(COURIER_PRICE),
        DeliveryMethod::NovaPoshta => Decimal::from(NOVA_POSHTA_PRICE),
    }
}

/// Order total: item subtotal plus the delivery tariff.
#[must_use]
pub fn total_with_delivery(subtotal: Decimal, method: DeliveryMethod) -> Decimal {
    subtotal + delivery_price(method)
}

// ===== Order Assembly =====

/// Assemble the backend order payload from the cart and the confirmed form.
///
/// Nova Poshta orders carry the branch address as the street plus the
/// branch reference fields; every other method ships to the buyer's own
/// address. The postal code is always sent empty, the backend does not
/// read it.
#[must_use]
pub fn build_order_payload(
    order_number: String,
    cart: &Cart,
    state: &CheckoutState,
    buyer_id: Option<&UserId>,
) -> OrderPayload {
    let payment_status = if state.payment_method == PaymentMethod::Online {
        PaymentStatus::Pending
    } else {
        PaymentStatus::CashOnDelivery
    };

    OrderPayload {
        order_number,
        buyer_id: buyer_id.map_or_else(|| "guest".to_string(), ToString::to_string),
        items: cart.to_order_items(),
        total_amount: total_with_delivery(cart.subtotal(), state.delivery_method),
        currency: "UAH".to_string(),
        shipping_address: shipping_address(state),
        status: OrderStatus::Pending,
        payment_status,
        payment_method: state.payment_method,
    }
}

/// Buyer contact forwarded to the payment provider.
#[must_use]
pub fn build_payment_customer(recipient: &RecipientForm) -> PaymentCustomer {
    PaymentCustomer {
        email: recipient.email.trim().to_string(),
        first_name: recipient.first_name.trim().to_string(),
        last_name: recipient.last_name.trim().to_string(),
        phone: recipient.phone.clone(),
    }
}

fn shipping_address(state: &CheckoutState) -> ShippingAddress {
    if state.delivery_method == DeliveryMethod::NovaPoshta {
        let selection = state.nova_poshta.as_ref();
        if let Some((np, warehouse)) =
            selection.and_then(|np| np.warehouse.as_ref().map(|w| (np, w)))
        {
            return ShippingAddress {
                street: warehouse.address.clone(),
                city: np.city.clone(),
                state: String::new(),
                postal_code: String::new(),
                country: "UA".to_string(),
                warehouse_ref: Some(warehouse.warehouse_ref.clone()),
                warehouse_number: Some(warehouse.number.clone()),
            };
        }
    }

    ShippingAddress {
        street: or_na(&state.recipient.address),
        city: or_na(&state.recipient.city),
        state: String::new(),
        postal_code: String::new(),
        country: "UA".to_string(),
        warehouse_ref: None,
        warehouse_number: None,
    }
}

// Self-pickup collects no address; the backend still wants the field.
fn or_na(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "N/A".to_string()
    } else {
        trimmed.to_string()
    }
}

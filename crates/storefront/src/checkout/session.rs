//! Serializable checkout state.
//!
//! One `CheckoutState` per session owns everything the checkout flow
//! touches: recipient form fields, delivery/payment selection, the Nova
//! Poshta lookup result, field errors from the last submit attempt, and the
//! order saga once submission starts. It survives reloads, so the in-flight
//! guard and the saga's step markers do too.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use bazaar_core::{DeliveryMethod, PaymentMethod, WarehouseRef};

use crate::checkout::saga::OrderSaga;
use crate::models::session_keys;

/// Recipient form fields, mutable per edit until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientForm {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
    pub comment: String,
}

/// Nova Poshta branch chosen in the lookup sub-form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedWarehouse {
    pub warehouse_ref: WarehouseRef,
    pub number: String,
    /// Branch description, becomes the street line on the order.
    pub address: String,
}

/// Result of the Nova Poshta city/warehouse lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovaPoshtaSelection {
    pub city: String,
    pub warehouse: Option<SelectedWarehouse>,
}

/// Where the checkout flow currently stands.
///
/// `Submitting` doubles as the duplicate-submission guard: a second
/// place-order request while one is in flight is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Editing,
    Submitting,
    Redirecting,
    Completed,
}

/// Per-session checkout state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutState {
    pub recipient: RecipientForm,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    pub nova_poshta: Option<NovaPoshtaSelection>,
    pub phase: CheckoutPhase,
    /// Field errors from the last failed submit, keyed by form field name.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
    /// Present once a submission has started; carries the frozen payload
    /// and step-completion markers.
    pub saga: Option<OrderSaga>,
}

impl CheckoutState {
    /// Apply one recipient field edit, clearing that field's error.
    ///
    /// Unknown field names are ignored. The phone field is normalized
    /// through the display mask as the buyer types.
    pub fn update_field(&mut self, field: &str, value: &str) {
        match field {
            "firstName" => self.recipient.first_name = value.to_string(),
            "lastName" => self.recipient.last_name = value.to_string(),
            "patronymic" => self.recipient.patronymic = value.to_string(),
            "phone" => self.recipient.phone = mask_phone(value),
            "email" => self.recipient.email = value.to_string(),
            "city" => self.recipient.city = value.to_string(),
            "address" => self.recipient.address = value.to_string(),
            "postalCode" => self.recipient.postal_code = value.to_string(),
            "comment" => self.recipient.comment = value.to_string(),
            _ => return,
        }
        self.errors.remove(field);
    }

    /// Select a delivery method, clearing address errors from the previous
    /// method's rule set.
    pub fn select_delivery(&mut self, method: DeliveryMethod) {
        self.delivery_method = method;
        self.errors.remove("city");
        self.errors.remove("address");
        self.errors.remove("postalCode");
        self.errors.remove("warehouse");
    }

    /// Pick a Nova Poshta settlement. Any previously chosen branch belongs
    /// to the old settlement and is dropped.
    pub fn select_nova_poshta_city(&mut self, city: String) {
        let changed = self
            .nova_poshta
            .as_ref()
            .is_none_or(|selection| selection.city != city);
        if changed {
            self.nova_poshta = Some(NovaPoshtaSelection {
                city,
                warehouse: None,
            });
        }
        self.errors.remove("city");
    }

    /// Pick a Nova Poshta branch within the chosen settlement.
    pub fn select_warehouse(&mut self, warehouse: SelectedWarehouse) {
        if let Some(selection) = self.nova_poshta.as_mut() {
            selection.warehouse = Some(warehouse);
            self.errors.remove("warehouse");
        }
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Submitting)
    }
}

/// Order summary handed to the success page, the counterpart of
/// navigation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_number: String,
    pub payment_method: PaymentMethod,
}

/// Session key for the last placed order.
pub const LAST_ORDER_KEY: &str = "last_order";

/// Format a phone number as `+38 050 123 45 67` while typing.
///
/// Keeps digits only and regroups them; capped at twelve digits.
#[must_use]
pub fn mask_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).take(12).collect();
    match digits.len() {
        0..=2 => format!("+{digits}"),
        3..=5 => format!("+{} {}", &digits[..2], &digits[2..]),
        6..=8 => format!("+{} {} {}", &digits[..2], &digits[2..5], &digits[5..]),
        9..=10 => format!(
            "+{} {} {} {}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..]
        ),
        _ => format!(
            "+{} {} {} {} {}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..10],
            &digits[10..]
        ),
    }
}

/// Load checkout state from the session, fresh if absent.
pub async fn get_checkout(session: &Session) -> CheckoutState {
    session
        .get::<CheckoutState>(session_keys::CHECKOUT)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist checkout state to the session.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn save_checkout(
    session: &Session,
    state: &CheckoutState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CHECKOUT, state.clone()).await
}

/// Drop checkout state entirely, used after completion.
///
/// # Errors
///
/// Returns error if the session store write fails.
pub async fn clear_checkout(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CheckoutState>(session_keys::CHECKOUT)
        .await
        .map(|_| ())
}

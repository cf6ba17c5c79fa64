//! Checkout route handlers.
//!
//! The form state lives in the session and every mutation returns the full
//! checkout view, so the client shell always renders from one source of
//! truth. Placing the order runs the create-order/open-payment saga; a
//! failed run keeps its completion markers in the session so a retry never
//! creates the order twice.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::{DeliveryMethod, PaymentMethod};

use crate::checkout::{
    CheckoutPhase, CheckoutState, DeliveryOption, NovaPoshtaSelection, OrderSaga, PaymentOption,
    PlacedOrder, RecipientForm, SagaError, SagaOutcome, SelectedWarehouse, build_order_payload,
    build_payment_customer, clear_checkout, delivery_options, delivery_price, get_checkout,
    is_payment_disabled, payment_options, saga, save_checkout, total_with_delivery, validate,
};
use crate::checkout::session::{LAST_ORDER_KEY, mask_phone};
use crate::error::Result;
use crate::i18n::{self, Msg, text};
use crate::marketplace::MarketplaceError;
use crate::marketplace::types::AuthUser;
use crate::models::cart::{Cart, get_cart, save_cart};
use crate::models::session::{self, Notice};
use crate::routes::PageMeta;
use crate::routes::cart::CartItemView;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Checkout page view model: the form, the option tables, and the summary.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub recipient: RecipientForm,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nova_poshta: Option<NovaPoshtaSelection>,
    pub errors: BTreeMap<String, String>,
    pub phase: CheckoutPhase,
    pub delivery_options: Vec<DeliveryOption>,
    pub payment_options: Vec<PaymentOption>,
    pub items: Vec<CartItemView>,
    pub subtotal: Decimal,
    pub delivery_price: Decimal,
    pub total: Decimal,
}

impl CheckoutView {
    async fn build(session: &Session, state: CheckoutState, cart: &Cart) -> Self {
        let meta = PageMeta::load(session).await;
        let subtotal = cart.subtotal();
        Self {
            delivery_options: delivery_options(meta.language),
            payment_options: payment_options(meta.language),
            items: cart.items.iter().map(CartItemView::from).collect(),
            subtotal,
            delivery_price: delivery_price(state.delivery_method),
            total: total_with_delivery(subtotal, state.delivery_method),
            recipient: state.recipient,
            delivery_method: state.delivery_method,
            payment_method: state.payment_method,
            nova_poshta: state.nova_poshta,
            errors: state.errors,
            phase: state.phase,
            meta,
        }
    }
}

/// Success page view model.
#[derive(Debug, Serialize)]
pub struct SuccessView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub order_number: String,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Page
// =============================================================================

/// Display the checkout page.
///
/// An empty cart bounces back to the cart page. A signed-in buyer with an
/// untouched form gets it prefilled from their saved profile.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = get_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let mut checkout = get_checkout(&session).await;

    if checkout.recipient == RecipientForm::default() {
        if let Some(user) = session::current_user(&session).await {
            match state.marketplace().current_user(&user.access_token).await {
                Ok(profile) => {
                    apply_profile(&mut checkout, &profile);
                    save_checkout(&session, &checkout).await?;
                    let language = session::language(&session).await;
                    session::push_notice(
                        &session,
                        Notice::info(text(language, Msg::ProfileDataApplied)),
                    )
                    .await?;
                }
                Err(e) => {
                    tracing::warn!("Failed to prefill checkout from profile: {e}");
                }
            }
        }
    }

    Ok(Json(CheckoutView::build(&session, checkout, &cart).await).into_response())
}

/// Copy saved profile fields into an untouched recipient form.
fn apply_profile(checkout: &mut CheckoutState, profile: &AuthUser) {
    let mut names = profile.full_name.split(' ');
    checkout.recipient.first_name = names.next().unwrap_or_default().to_string();
    checkout.recipient.last_name = names.next().unwrap_or_default().to_string();
    checkout.recipient.email = profile.email.clone();
    if let Some(phone) = &profile.phone {
        checkout.recipient.phone = mask_phone(phone);
    }
    if let Some(city) = &profile.city {
        checkout.recipient.city = city.clone();
    }
    if let Some(address) = &profile.address {
        checkout.recipient.address = address.clone();
    }
    if let Some(postal_code) = &profile.postal_code {
        checkout.recipient.postal_code = postal_code.clone();
    }

    // The backend stores the preference with underscores.
    if let Some(method) = profile
        .delivery_method
        .as_deref()
        .and_then(|raw| raw.replace('_', "-").parse::<DeliveryMethod>().ok())
    {
        checkout.delivery_method = method;
        if method == DeliveryMethod::NovaPoshta {
            if let Some(city) = &profile.city {
                checkout.select_nova_poshta_city(city.clone());
            }
        }
    }
}

// =============================================================================
// Form Mutations
// =============================================================================

/// One recipient field edit.
#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

/// Apply a recipient field edit.
#[instrument(skip(session, update), fields(field = %update.field))]
pub async fn update_recipient(
    session: Session,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<CheckoutView>> {
    let mut checkout = get_checkout(&session).await;
    checkout.update_field(&update.field, &update.value);
    save_checkout(&session, &checkout).await?;

    let cart = get_cart(&session).await;
    Ok(Json(CheckoutView::build(&session, checkout, &cart).await))
}

/// Delivery selection, optionally with the Nova Poshta lookup results.
#[derive(Debug, Deserialize)]
pub struct DeliverySelection {
    pub method: DeliveryMethod,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub warehouse: Option<SelectedWarehouse>,
}

/// Select a delivery method and, for Nova Poshta, the settlement and branch.
#[instrument(skip(session, selection), fields(method = %selection.method))]
pub async fn select_delivery(
    session: Session,
    Json(selection): Json<DeliverySelection>,
) -> Result<Json<CheckoutView>> {
    let mut checkout = get_checkout(&session).await;
    checkout.select_delivery(selection.method);
    if let Some(city) = selection.city {
        checkout.select_nova_poshta_city(city);
    }
    if let Some(warehouse) = selection.warehouse {
        checkout.select_warehouse(warehouse);
    }
    save_checkout(&session, &checkout).await?;

    let cart = get_cart(&session).await;
    Ok(Json(CheckoutView::build(&session, checkout, &cart).await))
}

/// Payment selection.
#[derive(Debug, Deserialize)]
pub struct PaymentSelection {
    pub method: PaymentMethod,
}

/// Select a payment method.
///
/// Picking a method that is advertised but not yet live leaves the current
/// choice in place and queues an explanatory notice.
#[instrument(skip(session, selection), fields(method = %selection.method))]
pub async fn select_payment(
    session: Session,
    Json(selection): Json<PaymentSelection>,
) -> Result<Json<CheckoutView>> {
    let mut checkout = get_checkout(&session).await;
    if is_payment_disabled(selection.method) {
        let language = session::language(&session).await;
        session::push_notice(
            &session,
            Notice::info(text(language, Msg::PaymentMethodUnavailable)),
        )
        .await?;
    } else {
        checkout.payment_method = selection.method;
        save_checkout(&session, &checkout).await?;
    }

    let cart = get_cart(&session).await;
    Ok(Json(CheckoutView::build(&session, checkout, &cart).await))
}

// =============================================================================
// Order Placement
// =============================================================================

/// Place the order.
///
/// Validation failures and saga failures both land back on the checkout
/// page with a notice. A saga that already created its order resumes at
/// the payment step instead of creating a duplicate.
#[instrument(skip(state, session))]
pub async fn place_order(State(state): State<AppState>, session: Session) -> Result<Response> {
    let language = session::language(&session).await;

    let mut cart = get_cart(&session).await;
    if cart.is_empty() {
        session::push_notice(&session, Notice::error(text(language, Msg::CartIsEmpty))).await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    let mut checkout = get_checkout(&session).await;
    if checkout.is_processing() {
        tracing::warn!("Duplicate place-order request ignored");
        return Ok(Redirect::to("/checkout").into_response());
    }

    let errors = validate(
        &checkout.recipient,
        checkout.delivery_method,
        checkout.nova_poshta.as_ref(),
        language,
    );
    if !errors.is_empty() {
        checkout.errors = errors;
        save_checkout(&session, &checkout).await?;
        session::push_notice(
            &session,
            Notice::error(text(language, Msg::FillRequiredFields)),
        )
        .await?;
        return Ok(Redirect::to("/checkout").into_response());
    }

    if is_payment_disabled(checkout.payment_method) {
        session::push_notice(
            &session,
            Notice::info(text(language, Msg::PaymentMethodUnavailable)),
        )
        .await?;
        return Ok(Redirect::to("/checkout").into_response());
    }

    let user = session::current_user(&session).await;

    // Resume a saga whose order already exists; start fresh otherwise.
    let mut saga = match checkout.saga.take() {
        Some(existing) if existing.order_id.is_some() => existing,
        _ => {
            let order_number = OrderSaga::generate_order_number(Utc::now());
            let payload = build_order_payload(
                order_number,
                &cart,
                &checkout,
                user.as_ref().map(|u| &u.id),
            );
            OrderSaga::new(payload, build_payment_customer(&checkout.recipient))
        }
    };

    let order_number = saga.order_number.clone();
    let payment_method = checkout.payment_method;

    checkout.phase = CheckoutPhase::Submitting;
    checkout.saga = Some(saga.clone());
    save_checkout(&session, &checkout).await?;

    let token = user.as_ref().map(|u| u.access_token.as_str());
    let outcome = saga::run(state.marketplace(), &mut saga, token).await;

    match outcome {
        Ok(SagaOutcome::Completed) => {
            session
                .insert(
                    LAST_ORDER_KEY,
                    PlacedOrder {
                        order_number,
                        payment_method,
                    },
                )
                .await?;
            cart.clear();
            save_cart(&session, &cart).await?;
            clear_checkout(&session).await?;
            session::push_notice(&session, Notice::success(text(language, Msg::OrderPlaced)))
                .await?;
            Ok(Redirect::to("/checkout/success").into_response())
        }
        Ok(SagaOutcome::RedirectToPayment { url }) => {
            checkout.phase = CheckoutPhase::Redirecting;
            checkout.saga = Some(saga);
            save_checkout(&session, &checkout).await?;
            session
                .insert(
                    LAST_ORDER_KEY,
                    PlacedOrder {
                        order_number,
                        payment_method,
                    },
                )
                .await?;
            session::push_notice(
                &session,
                Notice::info(text(language, Msg::RedirectingToPayment)),
            )
            .await?;
            Ok(Redirect::to(&url).into_response())
        }
        Err(err) => {
            // Completion markers survive in the session for the retry.
            checkout.phase = CheckoutPhase::Editing;
            checkout.saga = Some(saga);
            save_checkout(&session, &checkout).await?;

            tracing::warn!("Order placement failed: {err}");
            let message = match &err {
                SagaError::OrderCreation(e) => i18n::order_error(language, &backend_detail(e)),
                SagaError::PaymentSession(e) => i18n::payment_error(language, &backend_detail(e)),
                SagaError::PaymentDeclined(detail) => i18n::payment_error(language, detail),
            };
            session::push_notice(&session, Notice::error(message)).await?;
            Ok(Redirect::to("/checkout").into_response())
        }
    }
}

/// The human-readable part of a backend failure.
fn backend_detail(err: &MarketplaceError) -> String {
    match err {
        MarketplaceError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Completion Pages
// =============================================================================

/// Display the order-placed page.
///
/// Online payments clear the cart here rather than at placement, once the
/// buyer has actually come back from the hosted payment page.
#[instrument(skip(session))]
pub async fn success(session: Session) -> Result<Response> {
    let Some(placed) = session.get::<PlacedOrder>(LAST_ORDER_KEY).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    if placed.payment_method == PaymentMethod::Online {
        let mut cart = get_cart(&session).await;
        if !cart.is_empty() {
            cart.clear();
            save_cart(&session, &cart).await?;
        }
        clear_checkout(&session).await?;
    }

    Ok(Json(SuccessView {
        meta: PageMeta::load(&session).await,
        order_number: placed.order_number,
        payment_method: placed.payment_method,
    })
    .into_response())
}

/// Return point for a buyer who abandoned the hosted payment page.
///
/// The saga stays in the session, so trying again resumes at the payment
/// step with the order already created.
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Redirect> {
    let mut checkout = get_checkout(&session).await;
    checkout.phase = CheckoutPhase::Editing;
    save_checkout(&session, &checkout).await?;
    Ok(Redirect::to("/cart"))
}

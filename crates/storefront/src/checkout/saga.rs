//! Two-step order placement saga.
//!
//! Order creation and payment-session creation are sequential calls against
//! the backend. Step one's completion is recorded in the saga before step
//! two starts, so a retry after a payment failure resumes at the payment
//! step instead of creating a second order. The saga is serializable and
//! lives inside the session's checkout state, which keeps the markers
//! across reloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use bazaar_core::{OrderId, PaymentMethod};

use crate::i18n;
use crate::marketplace::types::{OrderPayload, PaymentCustomer, PaymentSessionRequest};
use crate::marketplace::{MarketplaceClient, MarketplaceError};

/// Errors from a saga run.
#[derive(Debug, Error)]
pub enum SagaError {
    /// Step one failed; no order was recorded as created.
    #[error("order creation failed: {0}")]
    OrderCreation(#[source] MarketplaceError),

    /// Step two failed in transport; the order already exists in `pending`.
    #[error("payment session request failed: {0}")]
    PaymentSession(#[source] MarketplaceError),

    /// The provider answered but refused to open a session.
    #[error("payment declined: {0}")]
    PaymentDeclined(String),
}

/// Outcome of a successful saga run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SagaOutcome {
    /// No online payment needed; the order is complete.
    Completed,
    /// Buyer must be sent to the hosted payment page.
    RedirectToPayment { url: String },
}

/// Serializable state for one order placement.
///
/// The payload and customer contact are frozen when the saga is created;
/// retries always submit exactly what the buyer confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSaga {
    /// Client-generated order number, stable across retries.
    pub order_number: String,
    /// Order payload frozen at first submission.
    pub payload: OrderPayload,
    /// Buyer contact forwarded to the payment provider.
    pub customer: PaymentCustomer,
    /// Step-one completion marker: backend ID of the created order.
    pub order_id: Option<OrderId>,
    pub started_at: DateTime<Utc>,
}

impl OrderSaga {
    /// Freeze a payload and customer contact into a fresh saga.
    #[must_use]
    pub fn new(payload: OrderPayload, customer: PaymentCustomer) -> Self {
        Self {
            order_number: payload.order_number.clone(),
            payload,
            customer,
            order_id: None,
            started_at: Utc::now(),
        }
    }

    /// Generate a timestamp-based order number, `ORDER-<unix millis>`.
    #[must_use]
    pub fn generate_order_number(now: DateTime<Utc>) -> String {
        format!("ORDER-{}", now.timestamp_millis())
    }

    /// The hosted-payment request for this order.
    ///
    /// Deterministic over the frozen payload, so a retried payment step
    /// sends the same request (the provider may still open a new session).
    #[must_use]
    pub fn payment_request(&self) -> PaymentSessionRequest {
        PaymentSessionRequest {
            external_id: self.order_number.clone(),
            amount: self.payload.total_amount,
            currency: self.payload.currency.clone(),
            customer: self.customer.clone(),
            description: i18n::payment_description(&self.order_number),
        }
    }
}

/// Run the saga, skipping steps already recorded as complete.
///
/// # Errors
///
/// Returns the failed step's error; the saga keeps its completion markers
/// so the caller can persist it and retry later.
#[instrument(skip_all, fields(order_number = %saga.order_number))]
pub async fn run(
    client: &MarketplaceClient,
    saga: &mut OrderSaga,
    token: Option<&str>,
) -> Result<SagaOutcome, SagaError> {
    // Step 1: create the order, unless a previous run already did.
    if saga.order_id.is_none() {
        let order = client
            .create_order(&saga.payload, token)
            .await
            .map_err(SagaError::OrderCreation)?;
        info!(order_id = %order.id, "Order created");
        saga.order_id = Some(order.id);
    } else {
        info!("Order already created, resuming at payment step");
    }

    // Step 2: open a hosted payment session when paying online.
    if saga.payload.payment_method == PaymentMethod::Online {
        let session = client
            .create_payment_session(&saga.payment_request(), token)
            .await
            .map_err(SagaError::PaymentSession)?;

        if !session.success {
            return Err(SagaError::PaymentDeclined(
                session.error.unwrap_or_else(|| "declined".to_string()),
            ));
        }
        let Some(action) = session.action else {
            return Err(SagaError::PaymentDeclined(
                "no redirect returned".to_string(),
            ));
        };

        info!("Payment session opened");
        return Ok(SagaOutcome::RedirectToPayment { url: action.value });
    }

    Ok(SagaOutcome::Completed)
}

//! Payment resume route handler.
//!
//! An order whose online payment never completed stays `pending` on the
//! backend. The profile page offers a pay link for those; this handler
//! opens a fresh hosted payment session and sends the buyer there.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::{OrderId, PaymentMethod, PaymentStatus};

use crate::error::{AppError, Result};
use crate::i18n;
use crate::marketplace::types::{PaymentCustomer, PaymentSessionRequest};
use crate::middleware::RequireUser;
use crate::models::session::{self, Notice};
use crate::state::AppState;

/// Open a new payment session for a pending order and redirect to it.
#[instrument(skip(state, session, user), fields(order_id = %order_id))]
pub async fn resume(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
    Path(order_id): Path<OrderId>,
) -> Result<Response> {
    let token = user.access_token.as_str();

    let order = state
        .marketplace()
        .get_order(&order_id, Some(token))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

    if order.payment_status != PaymentStatus::Pending
        || order.payment_method != Some(PaymentMethod::Online)
    {
        return Err(AppError::BadRequest(format!(
            "Order {} is not awaiting online payment",
            order.order_number
        )));
    }

    let amount = order.total_amount.ok_or_else(|| {
        AppError::BadRequest(format!("Order {} carries no amount", order.order_number))
    })?;

    // Contact details come from the saved profile, not the original form.
    let profile = state.marketplace().current_user(token).await?;
    let mut names = profile.full_name.split(' ');
    let customer = PaymentCustomer {
        email: profile.email.clone(),
        first_name: names.next().unwrap_or_default().to_string(),
        last_name: names.next().unwrap_or_default().to_string(),
        phone: profile.phone.unwrap_or_default(),
    };

    let request = PaymentSessionRequest {
        external_id: order.order_number.clone(),
        amount,
        currency: order.currency.clone().unwrap_or_else(|| "UAH".to_string()),
        customer,
        description: i18n::payment_description(&order.order_number),
    };

    let payment = state
        .marketplace()
        .create_payment_session(&request, Some(token))
        .await?;

    match payment.action {
        Some(action) if payment.success => Ok(Redirect::to(&action.value).into_response()),
        _ => {
            let detail = payment
                .error
                .unwrap_or_else(|| "no redirect returned".to_string());
            tracing::warn!("Payment resume failed for {}: {detail}", order.order_number);
            let language = session::language(&session).await;
            session::push_notice(
                &session,
                Notice::error(i18n::payment_error(language, &detail)),
            )
            .await?;
            Ok(Redirect::to("/profile").into_response())
        }
    }
}

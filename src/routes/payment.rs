use std::str::FromStr;

use axum::extract::{Path, State};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::Value;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Cart, ChargeRequest, PaymentBillRequest},
    utils::{
        extractors::{JsonBody, Session},
        response::DualJson,
    },
};

// The cart id doubles as the gateway order id.
pub async fn create_payment_bill(
    State(state): State<AppState>,
    Session(claims): Session,
    Path(cart_id): Path<String>,
    JsonBody(bill): JsonBody<PaymentBillRequest>,
) -> Result<DualJson<String, Value>> {
    let gross_amount = parse_gross_amount(&bill.cart_total_price)?;

    let request = ChargeRequest::qris(&cart_id, gross_amount, &claims.username, &bill.product_name);
    let response = state.payments.charge(&request).await?;

    Ok(DualJson(claims.username, response))
}

pub async fn get_payment_status(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> Result<DualJson<Cart, Value>> {
    let response = state.payments.check(&cart_id).await?;

    Ok(DualJson(Cart::default(), response))
}

fn parse_gross_amount(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    let invalid = || AppError::BadRequest("Invalid cart total price".to_string());

    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| invalid())?;

    amount.trunc().to_i64().ok_or_else(invalid)
}

use axum::extract::{Path, State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AddToCartRequest, Cart, NewCart},
    utils::{
        extractors::{JsonBody, Session, parse_cart_id, parse_user_id},
        response::{DualJson, JsonLine},
    },
};

pub async fn get_cart(
    State(state): State<AppState>,
    Session(claims): Session,
    Path(user_id): Path<String>,
) -> Result<DualJson<String, Cart>> {
    let user_id = parse_user_id(&user_id)?;

    let cart = state
        .store
        .find_cart(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

    Ok(DualJson(claims.username, cart))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Session(claims): Session,
    Path(user_id): Path<String>,
    JsonBody(payload): JsonBody<AddToCartRequest>,
) -> Result<DualJson<String, Cart>> {
    let user_id = parse_user_id(&user_id)?;

    // TODO: fold the lookup into the insert (INSERT ... SELECT) so a product
    // changing in between cannot be snapshotted stale.
    let product = state
        .store
        .find_product(payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let cart = state
        .store
        .insert_cart(NewCart::snapshot(user_id, &product))
        .await?;

    tracing::info!(
        "Cart {} created for user {} with product {}",
        cart.cart_id,
        cart.user_id,
        cart.product_id
    );

    Ok(DualJson(claims.username, cart))
}

pub async fn delete_from_cart(
    State(state): State<AppState>,
    Session(claims): Session,
    Path(cart_id): Path<String>,
) -> Result<JsonLine<String>> {
    let cart_id = parse_cart_id(&cart_id)?;

    let deleted = state.store.delete_cart(cart_id).await?;
    tracing::debug!("Deleted {} cart rows for cart_id={}", deleted, cart_id);

    Ok(JsonLine(claims.username))
}

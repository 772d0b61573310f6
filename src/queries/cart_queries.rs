use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Cart, NewCart},
};

// First row wins; any others are left unread.
pub async fn find_by_user_id(pool: &PgPool, user_id: i32) -> Result<Option<Cart>> {
    let cart = sqlx::query_as::<_, Cart>(
        "SELECT cart_id, user_id, product_id, product_name, product_price, cart_total_price
         FROM order_app_api_cart
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(cart)
}

pub async fn create_cart(pool: &PgPool, cart: NewCart) -> Result<Cart> {
    let cart_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO order_app_api_cart
         (user_id, product_id, product_name, product_price, cart_total_price)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING cart_id",
    )
    .bind(cart.user_id)
    .bind(cart.product_id)
    .bind(&cart.product_name)
    .bind(cart.product_price)
    .bind(cart.cart_total_price)
    .fetch_one(pool)
    .await?;

    Ok(cart.with_id(cart_id))
}

pub async fn delete_by_id(pool: &PgPool, cart_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM order_app_api_cart WHERE cart_id = $1")
        .bind(cart_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

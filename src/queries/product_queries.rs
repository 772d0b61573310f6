use sqlx::PgPool;

use crate::{error::Result, models::Product};

pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT product_id, product_name, product_price FROM order_app_api_products",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn find_by_id(pool: &PgPool, product_id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT product_id, product_name, product_price
         FROM order_app_api_products
         WHERE product_id = $1",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

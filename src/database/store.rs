use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Cart, NewCart, Product, User},
    queries::{cart_queries, product_queries, user_queries},
};

// "No rows" is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, user_name: &str) -> Result<Option<User>>;

    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn find_product(&self, product_id: i32) -> Result<Option<Product>>;

    async fn find_cart(&self, user_id: i32) -> Result<Option<Cart>>;

    async fn insert_cart(&self, cart: NewCart) -> Result<Cart>;

    async fn delete_cart(&self, cart_id: i32) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user(&self, user_name: &str) -> Result<Option<User>> {
        user_queries::find_by_user_name(&self.pool, user_name).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        product_queries::find_all(&self.pool).await
    }

    async fn find_product(&self, product_id: i32) -> Result<Option<Product>> {
        product_queries::find_by_id(&self.pool, product_id).await
    }

    async fn find_cart(&self, user_id: i32) -> Result<Option<Cart>> {
        cart_queries::find_by_user_id(&self.pool, user_id).await
    }

    async fn insert_cart(&self, cart: NewCart) -> Result<Cart> {
        cart_queries::create_cart(&self.pool, cart).await
    }

    async fn delete_cart(&self, cart_id: i32) -> Result<u64> {
        cart_queries::delete_by_id(&self.pool, cart_id).await
    }

    async fn ping(&self) -> Result<()> {
        super::check_health(&self.pool).await
    }
}

mod auth;
mod cart;
mod health;
mod payment;
mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::AppState;

// Protected handlers take a `Session` argument; everything else is open.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/welcome", get(auth::welcome))
        .route("/refresh", post(auth::refresh))
        .route("/products", get(products::get_products))
        .route("/cart/{user_id}", get(cart::get_cart))
        .route("/cart/add/{user_id}", post(cart::add_to_cart))
        .route("/cart/delete/{cart_id}", delete(cart::delete_from_cart))
        .route("/payment/bill/{cart_id}", post(payment::create_payment_bill))
        .route("/payment/status/{cart_id}", get(payment::get_payment_status))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .with_state(state)
}

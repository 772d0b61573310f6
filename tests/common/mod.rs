#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use chrono::Duration;
use order_app_api::{
    AppError, AppState, Result,
    database::Store,
    models::{Cart, ChargeRequest, NewCart, Product, User},
    routes,
    services::PaymentGateway,
    utils::jwt::SessionAuthority,
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-secret";

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<String, String>,
    products: Vec<Product>,
    carts: Vec<Cart>,
    next_cart_id: i32,
    fail: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, name: &str, password: &str) {
        self.state
            .write()
            .unwrap()
            .users
            .insert(name.to_string(), password.to_string());
    }

    pub fn add_product(&self, id: i32, name: &str, price: i32) {
        self.state.write().unwrap().products.push(Product {
            product_id: id,
            product_name: name.to_string(),
            product_price: price,
        });
    }

    pub fn add_cart(&self, cart: Cart) {
        self.state.write().unwrap().carts.push(cart);
    }

    pub fn cart_count(&self) -> usize {
        self.state.read().unwrap().carts.len()
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }

    fn check(&self) -> Result<()> {
        if self.state.read().unwrap().fail {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user(&self, user_name: &str) -> Result<Option<User>> {
        self.check()?;
        let state = self.state.read().unwrap();
        Ok(state.users.get(user_name).map(|password| User {
            user_name: user_name.to_string(),
            user_password: password.clone(),
        }))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.check()?;
        Ok(self.state.read().unwrap().products.clone())
    }

    async fn find_product(&self, product_id: i32) -> Result<Option<Product>> {
        self.check()?;
        let state = self.state.read().unwrap();
        Ok(state
            .products
            .iter()
            .find(|p| p.product_id == product_id)
            .cloned())
    }

    async fn find_cart(&self, user_id: i32) -> Result<Option<Cart>> {
        self.check()?;
        let state = self.state.read().unwrap();
        Ok(state.carts.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn insert_cart(&self, cart: NewCart) -> Result<Cart> {
        self.check()?;
        let mut state = self.state.write().unwrap();
        state.next_cart_id += 1;
        let cart = cart.with_id(state.next_cart_id);
        state.carts.push(cart.clone());
        Ok(cart)
    }

    async fn delete_cart(&self, cart_id: i32) -> Result<u64> {
        self.check()?;
        let mut state = self.state.write().unwrap();
        let before = state.carts.len();
        state.carts.retain(|c| c.cart_id != cart_id);
        Ok((before - state.carts.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

#[derive(Debug, Default)]
struct GatewayState {
    charges: Vec<ChargeRequest>,
    checks: Vec<String>,
    fail: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    state: Arc<RwLock<GatewayState>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charges(&self) -> Vec<ChargeRequest> {
        self.state.read().unwrap().charges.clone()
    }

    pub fn checks(&self) -> Vec<String> {
        self.state.read().unwrap().checks.clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<Value> {
        let mut state = self.state.write().unwrap();
        if state.fail {
            return Err(AppError::PaymentError("gateway unavailable".to_string()));
        }
        state.charges.push(request.clone());
        Ok(json!({
            "status_code": "201",
            "order_id": request.transaction_details.order_id,
            "gross_amount": format!("{}.00", request.transaction_details.gross_amount),
            "payment_type": request.payment_type,
            "transaction_status": "pending"
        }))
    }

    async fn check(&self, order_id: &str) -> Result<Value> {
        let mut state = self.state.write().unwrap();
        if state.fail {
            return Err(AppError::PaymentError("gateway unavailable".to_string()));
        }
        state.checks.push(order_id.to_string());
        Ok(json!({
            "status_code": "200",
            "order_id": order_id,
            "transaction_status": "settlement"
        }))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
    pub gateway: RecordingGateway,
}

pub fn setup() -> TestApp {
    let store = InMemoryStore::new();
    let gateway = RecordingGateway::new();
    store.add_user("alice", "pw");

    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(gateway.clone()),
        SessionAuthority::new(SECRET),
    );

    TestApp {
        router: routes::create_router(state),
        store,
        gateway,
    }
}

pub fn session_cookie(user: &str) -> String {
    let issued = SessionAuthority::new(SECRET)
        .issue(user, Duration::minutes(10))
        .unwrap();
    format!("token={}", issued.token)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn documents(&self) -> Vec<Value> {
        self.body
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get("set-cookie")
            .map(|v| v.to_str().unwrap().to_string())
    }
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

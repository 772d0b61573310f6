use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::AppConfig,
    database::{self, PgStore, Store},
    error::{AppError, Result},
    routes,
    services::{MidtransClient, PaymentGateway},
    utils::jwt::SessionAuthority,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub payments: Arc<dyn PaymentGateway>,
    pub sessions: Arc<SessionAuthority>,
    pub hardened_cookies: bool,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        payments: Arc<dyn PaymentGateway>,
        sessions: SessionAuthority,
    ) -> Self {
        Self {
            store,
            payments,
            sessions: Arc::new(sessions),
            hardened_cookies: false,
        }
    }

    pub fn with_hardened_cookies(mut self, hardened: bool) -> Self {
        self.hardened_cookies = hardened;
        self
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    let payments = MidtransClient::new(&config.midtrans)?;
    let sessions = SessionAuthority::new(config.session.jwt_secret.as_bytes());

    let state = AppState::new(Arc::new(PgStore::new(pool)), Arc::new(payments), sessions)
        .with_hardened_cookies(config.session.secure_cookie);

    let mut app = routes::create_router(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TraceLayer::new_for_http());

    if !config.cors.allowed_origins.is_empty() {
        let allowed_origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        app = app.layer(cors);
    }

    Ok(app)
}

mod app_config;

pub use app_config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, MidtransConfig, ServerConfig,
    SessionConfig,
};

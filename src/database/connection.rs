use std::str::FromStr;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};

use crate::{
    config::DatabaseConfig,
    error::{AppError, Result},
};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let ssl_mode = PgSslMode::from_str(&config.ssl_mode)
        .map_err(|_| AppError::ConfigError(format!("Invalid DB_SSLMODE value: {}", config.ssl_mode)))?;

    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    if config.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    tracing::info!(
        "Database connection established with {} max connections",
        config.max_connections
    );

    Ok(pool)
}

pub async fn check_health(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

use std::{env, fmt, str::FromStr};

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub midtrans: MidtransConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub secure_cookie: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secure_cookie", &self.secure_cookie)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api.sandbox.midtrans.com",
            Environment::Production => "https://api.midtrans.com",
        }
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(AppError::ConfigError(format!(
                "Invalid MIDTRANS_ENVIRONMENT value: {}",
                other
            ))),
        }
    }
}

#[derive(Clone)]
pub struct MidtransConfig {
    pub server_key: String,
    pub environment: Environment,
    pub timeout_secs: u64,
}

impl fmt::Debug for MidtransConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MidtransConfig")
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| AppError::ConfigError(format!("{} not set", key)))
        };
        let optional =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(AppError::ConfigError("JWT_SECRET must not be empty".to_string()));
        }

        Ok(Self {
            server: ServerConfig {
                host: optional("HOST", "0.0.0.0"),
                port: parse_value("PORT", &optional("PORT", "8000"))?,
                max_body_size: parse_value("MAX_BODY_SIZE", &optional("MAX_BODY_SIZE", "1048576"))?,
            },
            database: DatabaseConfig {
                host: required("DB_HOST")?,
                port: parse_value("DB_PORT", &required("DB_PORT")?)?,
                user: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                name: required("DB_NAME")?,
                ssl_mode: optional("DB_SSLMODE", "disable"),
                max_connections: parse_value(
                    "DB_MAX_CONNECTIONS",
                    &optional("DB_MAX_CONNECTIONS", "20"),
                )?,
                run_migrations: parse_value(
                    "DB_RUN_MIGRATIONS",
                    &optional("DB_RUN_MIGRATIONS", "false"),
                )?,
            },
            session: SessionConfig {
                jwt_secret,
                secure_cookie: parse_value(
                    "SESSION_COOKIE_SECURE",
                    &optional("SESSION_COOKIE_SECURE", "false"),
                )?,
            },
            midtrans: MidtransConfig {
                server_key: required("MIDTRANS_SERVER_KEY")?,
                environment: optional("MIDTRANS_ENVIRONMENT", "sandbox").parse()?,
                timeout_secs: parse_value(
                    "MIDTRANS_TIMEOUT_SECS",
                    &optional("MIDTRANS_TIMEOUT_SECS", "30"),
                )?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_default()
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("Invalid {} value", key)))
}

use serde::Deserialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_name: String,
    pub user_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

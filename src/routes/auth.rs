use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;

use crate::{
    AppState,
    error::{AppError, Result},
    models::LoginRequest,
    utils::{
        cookies,
        extractors::{JsonBody, Session},
        jwt::{LOGIN_TTL_MINUTES, REFRESH_TTL_MINUTES},
    },
};

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<CookieJar> {
    let user = state
        .store
        .find_user(&payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    if payload.password != user.user_password {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let issued = state
        .sessions
        .issue(&user.user_name, Duration::minutes(LOGIN_TTL_MINUTES))?;

    tracing::info!(
        "Session issued for {} until {}",
        user.user_name,
        issued.expires_at
    );

    Ok(jar.add(cookies::session_cookie(&issued, state.hardened_cookies)?))
}

pub async fn welcome(Session(claims): Session) -> String {
    format!("Welcome, {}!", claims.username)
}

// The previous token stays valid until its own expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Session(claims): Session,
    jar: CookieJar,
) -> Result<CookieJar> {
    let issued = state
        .sessions
        .refresh(&claims, Duration::minutes(REFRESH_TTL_MINUTES))?;

    tracing::info!(
        "Session refreshed for {} until {}",
        claims.username,
        issued.expires_at
    );

    Ok(jar.add(cookies::session_cookie(&issued, state.hardened_cookies)?))
}

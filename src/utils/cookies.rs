use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;

use crate::{
    error::{AppError, Result},
    utils::jwt::IssuedToken,
};

pub const TOKEN_COOKIE_NAME: &str = "token";

pub fn session_cookie(issued: &IssuedToken, hardened: bool) -> Result<Cookie<'static>> {
    let expires = OffsetDateTime::from_unix_timestamp(issued.expires_at.timestamp())
        .map_err(|e| AppError::InternalError(format!("Invalid cookie expiry: {}", e)))?;

    let mut builder = Cookie::build((TOKEN_COOKIE_NAME, issued.token.clone())).expires(expires);

    if hardened {
        builder = builder
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax);
    }

    Ok(builder.build())
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE_NAME).map(|c| c.value().to_string())
}

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;

use crate::{
    AppState,
    error::{AppError, Result},
    utils::{cookies, jwt::Claims},
};

// Verified session claims from the `token` cookie. Taken as a handler
// argument so routing (404/405) is settled before authentication.
#[derive(Debug, Clone)]
pub struct Session(pub Claims);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = cookies::session_token(&jar)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

        let claims = state.sessions.verify(&token)?;

        Ok(Session(claims))
    }
}

// Decoded from raw bytes regardless of Content-Type. Body-read failures such
// as the size limit keep axum's own status.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Response> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|_| {
            AppError::BadRequest("Invalid request payload".to_string()).into_response()
        })
    }
}

pub fn parse_user_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))
}

pub fn parse_cart_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid cart id".to_string()))
}

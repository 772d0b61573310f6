use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

// Identity document first, then the payload, each ending in a newline.
#[derive(Debug)]
pub struct DualJson<A, B>(pub A, pub B);

#[derive(Debug)]
pub struct JsonLine<T>(pub T);

fn push_document<T: Serialize>(buf: &mut Vec<u8>, value: &T) -> serde_json::Result<()> {
    serde_json::to_writer(&mut *buf, value)?;
    buf.push(b'\n');
    Ok(())
}

fn json_response(body: serde_json::Result<Vec<u8>>) -> Response {
    match body {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            AppError::InternalError(format!("Failed to serialize response: {}", e)).into_response()
        }
    }
}

impl<A: Serialize, B: Serialize> IntoResponse for DualJson<A, B> {
    fn into_response(self) -> Response {
        let mut buf = Vec::new();
        let written =
            push_document(&mut buf, &self.0).and_then(|_| push_document(&mut buf, &self.1));
        json_response(written.map(|_| buf))
    }
}

impl<T: Serialize> IntoResponse for JsonLine<T> {
    fn into_response(self) -> Response {
        let mut buf = Vec::new();
        let written = push_document(&mut buf, &self.0);
        json_response(written.map(|_| buf))
    }
}

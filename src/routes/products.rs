use axum::extract::State;

use crate::{
    AppState,
    error::Result,
    models::Product,
    utils::{extractors::Session, response::DualJson},
};

pub async fn get_products(
    State(state): State<AppState>,
    Session(claims): Session,
) -> Result<DualJson<String, Vec<Product>>> {
    let products = state.store.list_products().await?;

    Ok(DualJson(claims.username, products))
}

//! Product CRUD route handlers (proxies over the remote service).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use nuevo_estilo_core::{Product, ProductId};

use crate::api::ProductPayload;
use crate::error::Result;
use crate::middleware::AdminToken;
use crate::state::AppState;

/// Delete acknowledgement.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub success: bool,
}

/// List all products.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.api().get_productos().await?))
}

/// Create a product.
#[instrument(skip(state, token, payload), fields(name = %payload.name))]
pub async fn create(
    State(state): State<AppState>,
    token: AdminToken,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    Ok(Json(
        state.api().create_producto(token.as_str(), &payload).await?,
    ))
}

/// Update a product.
#[instrument(skip(state, token, payload), fields(producto_id = %producto_id))]
pub async fn update(
    State(state): State<AppState>,
    token: AdminToken,
    Path(producto_id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    Ok(Json(
        state
            .api()
            .update_producto(token.as_str(), producto_id, &payload)
            .await?,
    ))
}

/// Delete a product.
#[instrument(skip(state, token), fields(producto_id = %producto_id))]
pub async fn delete(
    State(state): State<AppState>,
    token: AdminToken,
    Path(producto_id): Path<ProductId>,
) -> Result<Json<DeleteAck>> {
    state
        .api()
        .delete_producto(token.as_str(), producto_id)
        .await?;
    Ok(Json(DeleteAck { success: true }))
}

//! Category CRUD route handlers (proxies over the remote service).

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use nuevo_estilo_core::{Category, CategoryId};

use crate::api::CategoryPayload;
use crate::error::Result;
use crate::middleware::AdminToken;
use crate::routes::products::DeleteAck;
use crate::state::AppState;

/// List all categories.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.api().get_categorias().await?))
}

/// Create a category.
#[instrument(skip(state, token, payload), fields(name = %payload.name))]
pub async fn create(
    State(state): State<AppState>,
    token: AdminToken,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    Ok(Json(
        state.api().create_categoria(token.as_str(), &payload).await?,
    ))
}

/// Update a category.
#[instrument(skip(state, token, payload), fields(categoria_id = %categoria_id))]
pub async fn update(
    State(state): State<AppState>,
    token: AdminToken,
    Path(categoria_id): Path<CategoryId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    Ok(Json(
        state
            .api()
            .update_categoria(token.as_str(), categoria_id, &payload)
            .await?,
    ))
}

/// Delete a category.
#[instrument(skip(state, token), fields(categoria_id = %categoria_id))]
pub async fn delete(
    State(state): State<AppState>,
    token: AdminToken,
    Path(categoria_id): Path<CategoryId>,
) -> Result<Json<DeleteAck>> {
    state
        .api()
        .delete_categoria(token.as_str(), categoria_id)
        .await?;
    Ok(Json(DeleteAck { success: true }))
}

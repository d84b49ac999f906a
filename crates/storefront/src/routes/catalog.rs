//! Catalog route handlers.
//!
//! Thin JSON pass-throughs over the cached catalog client.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use nuevo_estilo_core::{Category, CategoryId, Product};

use crate::error::Result;
use crate::state::AppState;

/// List all categories.
#[instrument(skip(state))]
pub async fn categorias(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.api().get_categorias().await?))
}

/// List all products.
#[instrument(skip(state))]
pub async fn productos(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.api().get_productos().await?))
}

/// List the products of one category.
#[instrument(skip(state))]
pub async fn productos_by_categoria(
    State(state): State<AppState>,
    Path(categoria_id): Path<CategoryId>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(
        state.api().get_productos_by_categoria(categoria_id).await?,
    ))
}

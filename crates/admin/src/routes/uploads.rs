//! Image upload route handlers.
//!
//! Admin forms upload the image first, then reference the returned path in
//! the catalog CRUD payload. Deleting a product/category deletes its image
//! through the same surface.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::AdminToken;
use crate::services::{StoredFile, UploadKind};
use crate::state::AppState;

/// Body of the delete endpoint: `{path, type}`.
#[derive(Debug, Deserialize)]
pub struct DeleteUploadRequest {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: UploadKind,
}

/// Delete acknowledgement.
#[derive(Debug, Serialize)]
pub struct DeleteUploadResponse {
    pub success: bool,
}

/// Pull the `file` field out of a multipart form.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("archivo").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();
            return Ok((name, bytes));
        }
    }
    Err(AppError::BadRequest("Archivo requerido".to_string()))
}

/// Store a product image.
#[instrument(skip(state, _token, multipart))]
pub async fn upload_producto(
    State(state): State<AppState>,
    _token: AdminToken,
    mut multipart: Multipart,
) -> Result<Json<StoredFile>> {
    let (name, bytes) = read_file_field(&mut multipart).await?;
    let stored = state
        .files()
        .save(UploadKind::Producto, &name, &bytes)
        .await?;
    Ok(Json(stored))
}

/// Store a category image.
#[instrument(skip(state, _token, multipart))]
pub async fn upload_categoria(
    State(state): State<AppState>,
    _token: AdminToken,
    mut multipart: Multipart,
) -> Result<Json<StoredFile>> {
    let (name, bytes) = read_file_field(&mut multipart).await?;
    let stored = state
        .files()
        .save(UploadKind::Categoria, &name, &bytes)
        .await?;
    Ok(Json(stored))
}

/// Delete a stored image. Idempotent: a missing file still succeeds.
#[instrument(skip(state, _token))]
pub async fn delete_upload(
    State(state): State<AppState>,
    _token: AdminToken,
    Json(request): Json<DeleteUploadRequest>,
) -> Result<Json<DeleteUploadResponse>> {
    if request.path.trim().is_empty() {
        return Err(AppError::BadRequest("Path y type requeridos".to_string()));
    }

    let removed = state.files().delete(request.kind, &request.path).await?;
    if !removed {
        tracing::debug!(path = %request.path, "Image already absent");
    }

    Ok(Json(DeleteUploadResponse { success: true }))
}

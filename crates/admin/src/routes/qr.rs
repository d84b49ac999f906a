//! Payment QR management route handlers.
//!
//! One well-known file, replaced atomically from the dashboard. The
//! storefront payment step serves the same file.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::AdminToken;
use crate::state::AppState;

/// Maximum accepted QR image size (5 MiB).
const MAX_QR_BYTES: usize = 5 * 1024 * 1024;

/// QR upload/delete acknowledgement.
#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'static str>,
}

/// QR existence check.
#[derive(Debug, Serialize)]
pub struct QrStatus {
    pub exists: bool,
}

/// Replace the payment QR image.
#[instrument(skip(state, _token, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    _token: AdminToken,
    mut multipart: Multipart,
) -> Result<Json<QrResponse>> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((content_type, bytes));
        }
    }

    let Some((content_type, bytes)) = file else {
        return Err(AppError::BadRequest("No file provided".to_string()));
    };

    if !content_type.as_deref().is_some_and(|ct| ct.starts_with("image/")) {
        return Err(AppError::Validation("File must be an image".to_string()));
    }
    if bytes.len() > MAX_QR_BYTES {
        return Err(AppError::Validation(
            "File size must not exceed 5MB".to_string(),
        ));
    }

    state.files().save_qr(&bytes).await?;

    tracing::info!("Payment QR replaced");
    Ok(Json(QrResponse {
        success: true,
        message: "QR uploaded successfully",
        path: Some("/qr-pago.jpg"),
    }))
}

/// Check whether a payment QR is stored.
#[instrument(skip(state, _token))]
pub async fn status(State(state): State<AppState>, _token: AdminToken) -> Json<QrStatus> {
    Json(QrStatus {
        exists: state.files().qr_exists().await,
    })
}

/// Delete the payment QR.
#[instrument(skip(state, _token))]
pub async fn delete(State(state): State<AppState>, _token: AdminToken) -> Result<Json<QrResponse>> {
    state.files().delete_qr().await?;
    Ok(Json(QrResponse {
        success: true,
        message: "QR deleted successfully",
        path: None,
    }))
}

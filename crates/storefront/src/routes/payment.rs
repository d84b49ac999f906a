//! Payment step route handlers.
//!
//! Consumes the draft checkout context written by the checkout handshake.
//! The draft keys are deleted only after the receipt reaches the order
//! service, so a failed upload can be retried; abandoning the flow leaves
//! them for the session to expire.

use axum::{
    Json,
    extract::{Multipart, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use nuevo_estilo_core::{OrderId, ShippingType};

use crate::api::ReceiptUpload;
use crate::error::{AppError, Result};
use crate::models::{CheckoutData, session_keys};
use crate::state::AppState;

/// Payment page data.
#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub pedido_id: OrderId,
    /// Amount due, captured when the order was created.
    pub monto: Decimal,
    pub checkout: Option<CheckoutData>,
    pub shipping_type: Option<ShippingType>,
    /// Where the storefront serves the payment QR image.
    pub qr_image: &'static str,
}

/// Receipt submission acknowledgement.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub success: bool,
    pub message: &'static str,
}

async fn get_session_value<T: serde::de::DeserializeOwned>(
    session: &Session,
    key: &str,
) -> Option<T> {
    session.get::<T>(key).await.ok().flatten()
}

/// Delete the draft checkout keys. Failures are logged only.
async fn clear_draft(session: &Session) {
    for key in [
        session_keys::CURRENT_PEDIDO_ID,
        session_keys::CHECKOUT_DATA,
        session_keys::CHECKOUT_TOTAL,
        session_keys::SHIPPING_TYPE,
    ] {
        if let Err(e) = session.remove::<serde_json::Value>(key).await {
            tracing::error!(key, "Failed to delete checkout draft value: {e}");
        }
    }
}

/// Show the payment step for the pending order.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<PaymentView>> {
    let pedido_id: OrderId = get_session_value(&session, session_keys::CURRENT_PEDIDO_ID)
        .await
        .ok_or_else(|| AppError::NotFound("No hay un pedido pendiente de pago".to_string()))?;

    let monto = get_session_value(&session, session_keys::CHECKOUT_TOTAL)
        .await
        .unwrap_or(Decimal::ZERO);
    let checkout = get_session_value(&session, session_keys::CHECKOUT_DATA).await;
    let shipping_type = get_session_value(&session, session_keys::SHIPPING_TYPE).await;

    Ok(Json(PaymentView {
        pedido_id,
        monto,
        checkout,
        shipping_type,
        qr_image: "/qr-pago.jpg",
    }))
}

/// Submit the payment receipt (multipart field `comprobante`).
///
/// Forwards the file to the order service and deletes the draft context
/// afterwards. On a failed forward the draft survives for a retry.
#[instrument(skip(state, session, multipart))]
pub async fn upload_comprobante(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Json<ReceiptResponse>> {
    let pedido_id: OrderId = get_session_value(&session, session_keys::CURRENT_PEDIDO_ID)
        .await
        .ok_or_else(|| AppError::Validation("Pedido no encontrado".to_string()))?;

    let mut receipt = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("comprobante") {
            let file_name = field
                .file_name()
                .unwrap_or("comprobante")
                .to_string();
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();
            receipt = Some(ReceiptUpload {
                file_name,
                content_type,
                bytes,
            });
        }
    }

    let receipt = receipt.ok_or_else(|| {
        AppError::Validation("Por favor selecciona un comprobante".to_string())
    })?;

    state.api().upload_comprobante(pedido_id, receipt).await?;

    clear_draft(&session).await;

    tracing::info!(pedido_id = %pedido_id, "Comprobante enviado");
    Ok(Json(ReceiptResponse {
        success: true,
        message: "Tu pago está en proceso de verificación",
    }))
}

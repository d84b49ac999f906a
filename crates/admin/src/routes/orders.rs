//! Order verification route handlers.
//!
//! The listing carries the payment-status projection alongside the raw
//! records so the dashboard renders counts and sales without a second
//! request.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nuevo_estilo_core::{ConfirmPaymentRequest, Order, OrderId, OrderStats};

use crate::api::PeriodFilter;
use crate::error::Result;
use crate::middleware::AdminToken;
use crate::state::AppState;

/// Order listing query.
#[derive(Debug, Default, Deserialize)]
pub struct PedidosQuery {
    #[serde(default)]
    pub periodo: PeriodFilter,
}

/// Order listing with its projection.
#[derive(Debug, Serialize)]
pub struct PedidosResponse {
    pub pedidos: Vec<Order>,
    pub stats: OrderStats,
}

/// List orders for a period with the payment-status projection.
#[instrument(skip(state, token))]
pub async fn list(
    State(state): State<AppState>,
    token: AdminToken,
    Query(query): Query<PedidosQuery>,
) -> Result<Json<PedidosResponse>> {
    let pedidos = state.api().get_pedidos(token.as_str(), query.periodo).await?;
    let stats = OrderStats::project(&pedidos);

    Ok(Json(PedidosResponse { pedidos, stats }))
}

/// Approve or reject an order's payment proof.
#[instrument(skip(state, token, decision), fields(pedido_id = %pedido_id))]
pub async fn confirm_pago(
    State(state): State<AppState>,
    token: AdminToken,
    Path(pedido_id): Path<OrderId>,
    Json(decision): Json<ConfirmPaymentRequest>,
) -> Result<Json<Order>> {
    let updated = state
        .api()
        .confirm_pago(token.as_str(), pedido_id, &decision)
        .await?;

    tracing::info!(pago_estado = %updated.pago_estado, "Pago verificado");
    Ok(Json(updated))
}

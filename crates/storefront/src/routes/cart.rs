//! Cart route handlers.
//!
//! The cart lives in the session under a single key and is rewritten in
//! full after every mutation - no batching, no debounce. A reload never
//! loses a completed mutation; the cost is one session write per action,
//! which is fine at storefront interaction rates.

use axum::{Json, extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use nuevo_estilo_core::{Cart, CartLine, ProductId};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub producto_id: ProductId,
    pub name: String,
    pub image: String,
    pub selected_color: String,
    pub quantity: u32,
    pub price: Decimal,
    pub subtotal: Decimal,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            producto_id: line.producto.id,
            name: line.producto.name.clone(),
            image: line.producto.image.clone(),
            selected_color: line.selected_color.clone(),
            quantity: line.quantity,
            price: line.producto.price,
            subtotal: line.subtotal(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart snapshot from the session.
///
/// Absent or malformed snapshots are a cold start - never an error.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the full cart snapshot to the session.
///
/// Write failures are logged only; the in-memory cart of this request
/// stays authoritative and the mutation still succeeds for the caller.
pub async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(session_keys::CART, cart).await {
        tracing::error!("Failed to persist cart snapshot: {e}");
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart request data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub producto_id: ProductId,
    #[serde(default)]
    pub selected_color: String,
}

/// Update cart quantity request data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub producto_id: ProductId,
    #[serde(default)]
    pub selected_color: String,
    pub quantity: i64,
}

/// Remove from cart request data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub producto_id: ProductId,
    #[serde(default)]
    pub selected_color: String,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let cart = load_cart(&session).await;
    Json(CartView::from(&cart))
}

/// Add one unit of a product to the cart.
///
/// The product snapshot is captured from the catalog at add time; later
/// catalog edits do not touch existing lines.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let producto = state
        .api()
        .find_producto(form.producto_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Producto {} no existe", form.producto_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add_item(&producto, &form.selected_color)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    save_cart(&session, &cart).await;

    Ok(Json(CartView::from(&cart)))
}

/// Replace a line's quantity. Zero or negative removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(form): Json<UpdateCartForm>) -> Json<CartView> {
    let mut cart = load_cart(&session).await;
    cart.set_quantity(form.producto_id, &form.selected_color, form.quantity);
    save_cart(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Remove a line from the cart. No-op when absent.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(form): Json<RemoveFromCartForm>) -> Json<CartView> {
    let mut cart = load_cart(&session).await;
    cart.remove_item(form.producto_id, &form.selected_color);
    save_cart(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Empty the cart. Writes an empty snapshot rather than deleting the key.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Json<CartView> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;

    Json(CartView::from(&cart))
}

/// Get the cart count badge value.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    Json(CartCount {
        count: cart.item_count(),
    })
}

//! Checkout submission handshake.
//!
//! The only all-or-nothing boundary in the storefront: nothing is mutated
//! until the order service confirms the order. Steps, in order:
//!
//! 1. Validate the shipping form
//! 2. Build the order request from the cart lines (no prices - the order
//!    service prices at order time)
//! 3. Submit; a failure surfaces to the caller with cart and session
//!    untouched, safe to resubmit
//! 4. Persist the draft checkout context for the payment step
//! 5. Clear the cart
//! 6. Answer with the order id

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use nuevo_estilo_core::{Cart, CreateOrderRequest, OrderId, ShippingType};

use crate::error::{AppError, Result};
use crate::models::{CheckoutData, session_keys};
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// Branch location shared with customers picking up in store.
const BRANCH_LOCATION_URL: &str = "https://maps.app.goo.gl/HU3CQ43wn6vEWZGi8";
const BRANCH_ADDRESS: &str = "Cochabamba, Bolivia";

/// Checkout form data.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub nombre_destinatario: String,
    #[serde(default)]
    pub numero_celular: String,
    #[serde(default)]
    pub envio_pais: String,
    #[serde(default)]
    pub codigo_telefonico: String,
    #[serde(default)]
    pub envio_estado: String,
    #[serde(default)]
    pub direccion: String,
    pub shipping_type: ShippingType,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub google_maps_link: Option<String>,
}

/// Checkout response: the created order and the amount due on the payment
/// step.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: OrderId,
    pub total: Decimal,
}

/// Resolve the delivery location link: an explicit maps link wins, then a
/// link derived from picked coordinates.
fn resolved_maps_link(form: &CheckoutForm) -> Option<String> {
    if let Some(link) = &form.google_maps_link
        && !link.trim().is_empty()
    {
        return Some(link.clone());
    }
    match (form.latitude, form.longitude) {
        (Some(lat), Some(lng)) => Some(format!("https://www.google.com/maps?q={lat},{lng}")),
        _ => None,
    }
}

/// Validate the shipping form. Aborts the handshake before any mutation.
fn validate(form: &CheckoutForm) -> Result<()> {
    let required = [
        (form.nombre_destinatario.as_str(), "nombre completo"),
        (form.numero_celular.as_str(), "número de celular"),
        (form.envio_pais.as_str(), "país"),
        (form.envio_estado.as_str(), "estado/provincia"),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, label)| *label)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Completa los campos requeridos: {}",
            missing.join(", ")
        )));
    }

    // Home delivery needs a deliverable location: a maps link, picked
    // coordinates, or at least address text.
    if !form.shipping_type.is_pickup()
        && resolved_maps_link(form).is_none()
        && form.direccion.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Indica la dirección o la ubicación para el envío a domicilio".to_string(),
        ));
    }

    Ok(())
}

/// Build the order-creation request from the validated form and the cart.
fn build_order_request(form: &CheckoutForm, cart: &Cart) -> CreateOrderRequest {
    let pickup = form.shipping_type.is_pickup();
    let direccion = if pickup && form.direccion.trim().is_empty() {
        BRANCH_ADDRESS.to_string()
    } else {
        form.direccion.clone()
    };
    let google_maps_link = if pickup {
        Some(BRANCH_LOCATION_URL.to_string())
    } else {
        resolved_maps_link(form)
    };

    CreateOrderRequest {
        items: cart.order_items(),
        envio_pais: form.envio_pais.clone(),
        envio_estado: form.envio_estado.clone(),
        direccion,
        nombre_destinatario: form.nombre_destinatario.clone(),
        numero_celular: form.numero_celular.clone(),
        recojo_sucursal: pickup,
        google_maps_link,
    }
}

/// Insert a session value, logging (not surfacing) a write failure.
async fn insert_logged<T: Serialize>(session: &Session, key: &str, value: &T) {
    if let Err(e) = session.insert(key, value).await {
        tracing::error!(key, "Failed to persist checkout draft value: {e}");
    }
}

/// Submit the checkout.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::Validation("Tu carrito está vacío".to_string()));
    }
    validate(&form)?;

    let request = build_order_request(&form, &cart);
    let total = cart.total();

    // All-or-nothing boundary: a failure here leaves cart and session as
    // they were, and the caller simply resubmits.
    let created = state.api().create_pedido(&request).await?;

    let draft = CheckoutData {
        nombre_destinatario: form.nombre_destinatario.clone(),
        numero_celular: form.numero_celular.clone(),
        envio_pais: form.envio_pais.clone(),
        codigo_telefonico: form.codigo_telefonico.clone(),
        envio_estado: form.envio_estado.clone(),
        direccion: request.direccion.clone(),
        shipping_type: form.shipping_type,
        google_maps_link: request.google_maps_link.clone(),
    };
    insert_logged(&session, session_keys::CURRENT_PEDIDO_ID, &created.id).await;
    insert_logged(&session, session_keys::CHECKOUT_DATA, &draft).await;
    insert_logged(&session, session_keys::CHECKOUT_TOTAL, &total).await;
    insert_logged(&session, session_keys::SHIPPING_TYPE, &form.shipping_type).await;

    cart.clear();
    save_cart(&session, &cart).await;

    tracing::info!(pedido_id = %created.id, "Pedido creado");
    Ok(Json(CheckoutResponse {
        id: created.id,
        total,
    }))
}

//! Session-related types.
//!
//! The session is the visitor's durable key-value surface: it survives page
//! reloads and holds the cart snapshot plus the draft checkout context
//! between order creation and payment-proof submission.

use serde::{Deserialize, Serialize};

use nuevo_estilo_core::ShippingType;

/// Shipping form values captured when an order is created.
///
/// Stored under [`session_keys::CHECKOUT_DATA`] so the payment step can
/// still show the recipient after the cart has been cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutData {
    pub nombre_destinatario: String,
    pub numero_celular: String,
    pub envio_pais: String,
    #[serde(default)]
    pub codigo_telefonico: String,
    pub envio_estado: String,
    pub direccion: String,
    pub shipping_type: ShippingType,
    #[serde(default)]
    pub google_maps_link: Option<String>,
}

/// Session keys.
///
/// Each key has exactly one writer: the cart routes own `cart`, the
/// checkout/payment pair owns the draft keys.
pub mod session_keys {
    /// Key for the serialized cart line sequence.
    pub const CART: &str = "cart";

    /// Key for the pending order id awaiting payment.
    pub const CURRENT_PEDIDO_ID: &str = "current_pedido_id";

    /// Key for the shipping form snapshot of the pending order.
    pub const CHECKOUT_DATA: &str = "checkout_data";

    /// Key for the merchandise total computed at order-creation time.
    pub const CHECKOUT_TOTAL: &str = "checkout_total";

    /// Key for the chosen shipping mode of the pending order.
    pub const SHIPPING_TYPE: &str = "shipping_type";
}

//! Order types for the remote order service.
//!
//! Request bodies intentionally carry no prices: the order service is the
//! source of truth for pricing (and shipping cost) at order time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;
use super::id::{OrderDetailId, OrderId, ProductId};
use super::product::Product;
use super::status::PaymentStatus;

/// How the buyer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingType {
    /// Pickup at the branch.
    Recojo,
    /// Home delivery.
    Envio,
}

impl ShippingType {
    #[must_use]
    pub const fn is_pickup(self) -> bool {
        matches!(self, Self::Recojo)
    }
}

/// One line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(rename = "productoId")]
    pub producto_id: ProductId,
    pub cantidad: u32,
}

/// Body of `POST /pedidos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemInput>,
    pub envio_pais: String,
    pub envio_estado: String,
    pub direccion: String,
    pub nombre_destinatario: String,
    pub numero_celular: String,
    pub recojo_sucursal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}

/// Response of `POST /pedidos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
}

/// One detail line of an order as reported by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: OrderDetailId,
    pub producto: Product,
    pub cantidad: u32,
    #[serde(default, deserialize_with = "de::lenient_decimal")]
    pub precio_unitario: Decimal,
    #[serde(default, deserialize_with = "de::lenient_decimal")]
    pub subtotal: Decimal,
}

/// An order record (`pedido`) as reported by the order service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Creation timestamp, passed through as reported.
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub envio_pais: String,
    #[serde(default)]
    pub envio_estado: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub nombre_destinatario: String,
    #[serde(default)]
    pub numero_celular: String,
    #[serde(default)]
    pub recojo_sucursal: bool,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    /// Absent on records predating payment verification; counts as pending.
    #[serde(default)]
    pub pago_estado: PaymentStatus,
    #[serde(default)]
    pub comprobante_url: Option<String>,
    #[serde(default)]
    pub observacion: Option<String>,
    #[serde(default)]
    pub detalles: Vec<OrderDetail>,
    #[serde(default, deserialize_with = "de::lenient_decimal")]
    pub total: Decimal,
}

/// Verdict on a submitted payment proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDecision {
    Pagado,
    Rechazado,
}

/// Body of `PATCH /pedidos/{id}/confirmar-pago`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub pago_estado: PaymentDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_wire_shape() {
        let request = CreateOrderRequest {
            items: vec![OrderItemInput {
                producto_id: ProductId::new(5),
                cantidad: 2,
            }],
            envio_pais: "BO".to_string(),
            envio_estado: "Cochabamba".to_string(),
            direccion: "Av. Heroínas 123".to_string(),
            nombre_destinatario: "Ana Rojas".to_string(),
            numero_celular: "70000000".to_string(),
            recojo_sucursal: false,
            google_maps_link: None,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["items"][0]["productoId"], 5);
        assert_eq!(json["items"][0]["cantidad"], 2);
        // Prices never travel with the request
        assert!(json["items"][0].get("price").is_none());
        assert!(json.get("total").is_none());
        // Omitted maps link stays off the wire
        assert!(json.get("google_maps_link").is_none());
    }

    #[test]
    fn test_order_tolerates_sparse_record() {
        let json = r#"{"id": 11, "fecha": "2025-07-01T14:00:00.000Z", "total": "150.00"}"#;
        let order: Order = serde_json::from_str(json).expect("deserialize");

        assert_eq!(order.id, OrderId::new(11));
        assert_eq!(order.pago_estado, PaymentStatus::Pendiente);
        assert!(order.detalles.is_empty());
        assert_eq!(order.total, "150.00".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_confirm_payment_decision_wire_values() {
        let body = ConfirmPaymentRequest {
            pago_estado: PaymentDecision::Rechazado,
            observacion: Some("monto incompleto".to_string()),
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["pago_estado"], "rechazado");
        assert_eq!(json["observacion"], "monto incompleto");
    }

    #[test]
    fn test_shipping_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&ShippingType::Recojo).expect("serialize"),
            "\"recojo\""
        );
        assert_eq!(
            serde_json::to_string(&ShippingType::Envio).expect("serialize"),
            "\"envio\""
        );
    }
}

//! Core types for Nuevo Estilo.
//!
//! Wire-facing structs keep the upstream API's Spanish field names
//! (`envio_pais`, `recojo_sucursal`, ...) so serialization matches the
//! contract without a rename layer.

pub mod id;
pub mod order;
pub mod product;
pub mod status;

mod de;

pub use id::*;
pub use order::{
    ConfirmPaymentRequest, CreateOrderRequest, CreatedOrder, Order, OrderDetail, OrderItemInput,
    PaymentDecision, ShippingType,
};
pub use product::{Category, CategoryRef, Product};
pub use status::PaymentStatus;

//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Catalog (cached pass-throughs)
//! GET  /categorias                 - Category listing
//! GET  /productos                  - Product listing
//! GET  /productos/categoria/{id}   - Products of one category
//!
//! # Cart (session-backed)
//! GET    /cart                     - Cart contents with totals
//! DELETE /cart                     - Empty the cart
//! POST   /cart/add                 - Add one unit of a product+color
//! POST   /cart/update              - Replace a line quantity (<= 0 removes)
//! POST   /cart/remove              - Remove a line
//! GET    /cart/count               - Cart badge count
//!
//! # Checkout & payment
//! POST /checkout                   - Create the order, write the draft context
//! GET  /pago                       - Pending-payment data for the payment step
//! POST /pago/comprobante           - Forward the payment receipt (multipart)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod payment;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Receipt uploads can exceed axum's 2 MiB default body limit.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the storefront router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categorias", get(catalog::categorias))
        .route("/productos", get(catalog::productos))
        .route(
            "/productos/categoria/{id}",
            get(catalog::productos_by_categoria),
        )
        .route("/cart", get(cart::show).delete(cart::clear))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/count", get(cart::count))
        .route("/checkout", post(checkout::submit))
        .route("/pago", get(payment::show))
        .route("/pago/comprobante", post(payment::upload_comprobante))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

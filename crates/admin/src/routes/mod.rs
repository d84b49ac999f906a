//! HTTP route handlers for the admin back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Auth glue (verification is remote)
//! POST /auth/login                      - Forward credentials, keep the token
//! POST /auth/logout                     - Drop the token
//!
//! # Orders
//! GET   /pedidos?periodo=               - Period-filtered listing + projection
//! PATCH /pedidos/{id}/confirmar-pago    - Approve/reject a payment proof
//!
//! # Catalog CRUD (proxies)
//! GET    /productos                     - Product listing
//! POST   /productos                     - Create product
//! PATCH  /productos/{id}                - Update product
//! DELETE /productos/{id}                - Delete product
//! GET    /categorias                    - Category listing
//! POST   /categorias                    - Create category
//! PATCH  /categorias/{id}               - Update category
//! DELETE /categorias/{id}               - Delete category
//!
//! # Local file storage
//! POST /upload/producto                 - Store a product image (multipart `file`)
//! POST /upload/categoria                - Store a category image (multipart `file`)
//! POST /upload/delete                   - Delete a stored image ({path, type})
//! POST   /qr/upload                     - Replace the payment QR
//! GET    /qr                            - Payment QR existence check
//! DELETE /qr                            - Delete the payment QR
//! ```

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod qr;
pub mod uploads;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Image uploads can exceed axum's 2 MiB default body limit.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the admin router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/pedidos", get(orders::list))
        .route("/pedidos/{id}/confirmar-pago", patch(orders::confirm_pago))
        .route("/productos", get(products::list).post(products::create))
        .route(
            "/productos/{id}",
            patch(products::update).delete(products::delete),
        )
        .route("/categorias", get(categories::list).post(categories::create))
        .route(
            "/categorias/{id}",
            patch(categories::update).delete(categories::delete),
        )
        .route("/upload/producto", post(uploads::upload_producto))
        .route("/upload/categoria", post(uploads::upload_categoria))
        .route("/upload/delete", post(uploads::delete_upload))
        .route("/qr/upload", post(qr::upload))
        .route("/qr", get(qr::status).delete(qr::delete))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

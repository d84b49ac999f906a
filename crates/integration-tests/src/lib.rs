//! Test harness for the storefront and admin services.
//!
//! Boots a stub of the remote catalog/order service on an ephemeral port,
//! then the real storefront/admin routers against it. Tests drive the
//! services over HTTP with cookie-jar clients, so sessions behave exactly
//! as they do for a browser.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// The admin password the stub backend accepts.
pub const STUB_ADMIN_PASSWORD: &str = "secreta";

/// The bearer token the stub backend issues.
pub const STUB_ADMIN_TOKEN: &str = "token-abc123";

// =============================================================================
// Stub backend
// =============================================================================

/// Controllable state of the stub remote service.
#[derive(Debug, Default)]
pub struct StubState {
    /// When set, `POST /pedidos` fails with 500.
    pub fail_orders: AtomicBool,
    /// Bodies received by `POST /pedidos`.
    pub created_orders: Mutex<Vec<Value>>,
    /// (order id, file name) pairs received by the comprobante endpoint.
    pub receipts: Mutex<Vec<(i32, String)>>,
    next_order_id: AtomicI32,
}

/// A running stub backend.
pub struct StubBackend {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
}

impl StubBackend {
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_fail_orders(&self, fail: bool) {
        self.state.fail_orders.store(fail, Ordering::SeqCst);
    }
}

fn productos_fixture() -> Value {
    // Mixed encodings on purpose: string price, JSON-encoded color list,
    // missing color field - the storefront must normalize all of them.
    json!([
        {
            "id": 1,
            "name": "Montura Aviador",
            "price": "89.90",
            "image": "aviador.jpg",
            "color": "[\"negro\",\"dorado\"]",
            "marca": "RayBan",
            "categoria": {"id": 1, "name": "Monturas"}
        },
        {
            "id": 2,
            "name": "Gotas Humectantes",
            "price": 25.5,
            "image": "gotas.jpg",
            "color": [],
            "categoria": {"id": 2, "name": "Accesorios"}
        },
        {
            "id": 3,
            "name": "Estuche Rígido",
            "price": 10,
            "image": "estuche.jpg",
            "categoria": {"id": 2, "name": "Accesorios"}
        }
    ])
}

fn categorias_fixture() -> Value {
    json!([
        {"id": 1, "name": "Monturas", "image": "monturas.jpg"},
        {"id": 2, "name": "Accesorios", "image": "accesorios.jpg"}
    ])
}

fn pedidos_fixture() -> Value {
    json!([
        {"id": 1, "fecha": "2025-07-01T10:00:00.000Z", "total": "10.00"},
        {"id": 2, "fecha": "2025-07-02T11:00:00.000Z", "pago_estado": "pagado", "total": "25.50"},
        {"id": 3, "fecha": "2025-07-02T12:00:00.000Z", "pago_estado": "rechazado", "total": "5.00"},
        {"id": 4, "fecha": "2025-07-03T09:30:00.000Z", "pago_estado": "pagado", "total": "4.50"},
        {"id": 5, "fecha": "2025-07-03T16:45:00.000Z", "pago_estado": "en_revision", "total": "99.00"}
    ])
}

async fn stub_productos() -> Json<Value> {
    Json(productos_fixture())
}

async fn stub_categorias() -> Json<Value> {
    Json(categorias_fixture())
}

async fn stub_productos_by_categoria(Path(categoria_id): Path<i32>) -> Json<Value> {
    let filtered: Vec<Value> = productos_fixture()
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["categoria"]["id"] == json!(categoria_id))
        .cloned()
        .collect();
    Json(Value::Array(filtered))
}

async fn stub_create_pedido(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_orders.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "No se pudo crear el pedido"})),
        )
            .into_response();
    }

    let id = state.next_order_id.fetch_add(1, Ordering::SeqCst) + 1;
    state.created_orders.lock().unwrap().push(body);
    Json(json!({"id": id})).into_response()
}

async fn stub_pedidos() -> Json<Value> {
    Json(pedidos_fixture())
}

async fn stub_comprobante(
    State(state): State<Arc<StubState>>,
    Path(pedido_id): Path<i32>,
    mut multipart: Multipart,
) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("comprobante") {
            let file_name = field.file_name().unwrap_or("").to_string();
            // Drain the field so the body is fully read
            let _ = field.bytes().await;
            state.receipts.lock().unwrap().push((pedido_id, file_name));
            return Json(json!({"success": true})).into_response();
        }
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "comprobante requerido"})),
    )
        .into_response()
}

async fn stub_confirm_pago(Path(pedido_id): Path<i32>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": pedido_id,
        "fecha": "2025-07-02T11:00:00.000Z",
        "pago_estado": body["pago_estado"],
        "observacion": body["observacion"],
        "total": "25.50"
    }))
}

async fn stub_login(Json(body): Json<Value>) -> Response {
    if body["password"] == json!(STUB_ADMIN_PASSWORD) {
        Json(json!({"access_token": STUB_ADMIN_TOKEN})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Credenciales inválidas"})),
        )
            .into_response()
    }
}

/// Catalog writes demand the issued bearer token, like the real service.
fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {STUB_ADMIN_TOKEN}"))
}

async fn stub_catalog_write(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Token inválido"})),
        )
            .into_response();
    }
    body["id"] = json!(99);
    Json(body).into_response()
}

async fn stub_catalog_delete(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Token inválido"})),
        )
            .into_response();
    }
    Json(json!({"deleted": true})).into_response()
}

/// Boot the stub remote service on an ephemeral port.
pub async fn spawn_stub_backend() -> StubBackend {
    let state = Arc::new(StubState::default());

    let app = Router::new()
        .route("/productos", get(stub_productos).post(stub_catalog_write))
        .route(
            "/productos/{id}",
            patch(stub_catalog_write).delete(stub_catalog_delete),
        )
        .route(
            "/productos/categoria/{id}",
            get(stub_productos_by_categoria),
        )
        .route("/categorias", get(stub_categorias).post(stub_catalog_write))
        .route(
            "/categorias/{id}",
            patch(stub_catalog_write).delete(stub_catalog_delete),
        )
        .route("/pedidos", get(stub_pedidos).post(stub_create_pedido))
        .route("/pedidos/{id}/comprobante", post(stub_comprobante))
        .route("/pedidos/dia", get(stub_pedidos))
        .route("/pedidos/semana", get(stub_pedidos))
        .route("/pedidos/mes", get(stub_pedidos))
        .route("/pedidos/{id}/confirmar-pago", patch(stub_confirm_pago))
        .route("/auth/admin/login", post(stub_login))
        .with_state(Arc::clone(&state));

    let addr = serve(app).await;
    StubBackend { addr, state }
}

// =============================================================================
// Service spawners
// =============================================================================

/// Boot the real storefront router against the given backend.
pub async fn spawn_storefront(api_base_url: &str) -> SocketAddr {
    use nuevo_estilo_storefront::{config::StorefrontConfig, middleware, routes, state::AppState};

    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        api_base_url: api_base_url.parse().unwrap(),
        public_dir: temp_dir("storefront-public"),
        sentry_dsn: None,
    };

    let session_layer = middleware::create_session_layer(&config);
    let app = routes::routes()
        .layer(session_layer)
        .with_state(AppState::new(config));

    serve(app).await
}

/// Boot the real admin router against the given backend, writing uploads
/// under the given public directory.
pub async fn spawn_admin(api_base_url: &str, public_dir: PathBuf) -> SocketAddr {
    use nuevo_estilo_admin::{config::AdminConfig, middleware, routes, state::AppState};

    let config = AdminConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        api_base_url: api_base_url.parse().unwrap(),
        public_dir,
        sentry_dsn: None,
    };

    let session_layer = middleware::create_session_layer(&config);
    let app = routes::routes()
        .layer(session_layer)
        .with_state(AppState::new(config));

    serve(app).await
}

/// A fresh temp directory for one test run.
#[must_use]
pub fn temp_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ne-{prefix}-{}", uuid::Uuid::new_v4()))
}

/// A reqwest client with a cookie jar, so session cookies behave like a
/// browser tab.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

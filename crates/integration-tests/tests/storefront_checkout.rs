//! Integration tests for the checkout handshake and the payment step.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{Value, json};

use nuevo_estilo_integration_tests::{
    StubBackend, client, spawn_storefront, spawn_stub_backend,
};

async fn setup() -> (StubBackend, String, reqwest::Client) {
    let backend = spawn_stub_backend().await;
    let addr = spawn_storefront(&backend.base_url()).await;
    (backend, format!("http://{addr}"), client())
}

async fn fill_cart(client: &reqwest::Client, base: &str) {
    for (producto_id, color) in [(1, "negro"), (1, "negro"), (2, "")] {
        let response = client
            .post(format!("{base}/cart/add"))
            .json(&json!({"producto_id": producto_id, "selected_color": color}))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }
}

fn shipping_form() -> Value {
    json!({
        "nombre_destinatario": "Ana Rojas",
        "numero_celular": "70000000",
        "envio_pais": "BO",
        "codigo_telefonico": "+591",
        "envio_estado": "Cochabamba",
        "direccion": "Av. Heroínas 123",
        "shipping_type": "envio"
    })
}

async fn cart_count(client: &reqwest::Client, base: &str) -> i64 {
    let count: Value = client
        .get(format!("{base}/cart/count"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    count["count"].as_i64().unwrap()
}

#[tokio::test]
async fn successful_checkout_clears_cart_and_writes_draft() {
    let (backend, base, client) = setup().await;
    fill_cart(&client, &base).await;

    let response = client
        .post(format!("{base}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["id"], 1);
    // 2 x 89.90 + 25.5
    assert_eq!(created["total"], "205.30");

    // The cart is gone
    assert_eq!(cart_count(&client, &base).await, 0);

    // The draft context backs the payment step
    let pago: Value = client
        .get(format!("{base}/pago"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pago["pedido_id"], 1);
    assert_eq!(pago["monto"], "205.30");
    assert_eq!(pago["checkout"]["nombre_destinatario"], "Ana Rojas");
    assert_eq!(pago["shipping_type"], "envio");

    // The service received products and quantities, never prices
    let orders = backend.state.created_orders.lock().unwrap();
    let body = &orders[0];
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0], json!({"productoId": 1, "cantidad": 2}));
    assert_eq!(body["items"][1], json!({"productoId": 2, "cantidad": 1}));
    assert!(body.get("total").is_none());
    assert_eq!(body["recojo_sucursal"], false);
}

#[tokio::test]
async fn failed_order_creation_leaves_everything_untouched() {
    let (backend, base, client) = setup().await;
    fill_cart(&client, &base).await;
    backend.set_fail_orders(true);

    let response = client
        .post(format!("{base}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No se pudo crear el pedido");

    // Cart is intact, no draft exists
    assert_eq!(cart_count(&client, &base).await, 3);
    let pago = client.get(format!("{base}/pago")).send().await.unwrap();
    assert_eq!(pago.status().as_u16(), 404);

    // Resubmitting after the outage succeeds with the same cart
    backend.set_fail_orders(false);
    let retry = client
        .post(format!("{base}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .unwrap();
    assert!(retry.status().is_success());
    assert_eq!(cart_count(&client, &base).await, 0);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let (_backend, base, client) = setup().await;

    let response = client
        .post(format!("{base}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn delivery_without_location_is_rejected_before_submission() {
    let (backend, base, client) = setup().await;
    fill_cart(&client, &base).await;

    let mut form = shipping_form();
    form["direccion"] = json!("");

    let response = client
        .post(format!("{base}/checkout"))
        .json(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);

    // Validation aborted before the service was called
    assert!(backend.state.created_orders.lock().unwrap().is_empty());
    assert_eq!(cart_count(&client, &base).await, 3);
}

#[tokio::test]
async fn pickup_order_reports_branch_pickup() {
    let (backend, base, client) = setup().await;
    fill_cart(&client, &base).await;

    let mut form = shipping_form();
    form["shipping_type"] = json!("recojo");
    form["direccion"] = json!("");

    let response = client
        .post(format!("{base}/checkout"))
        .json(&form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let orders = backend.state.created_orders.lock().unwrap();
    assert_eq!(orders[0]["recojo_sucursal"], true);
    assert!(
        orders[0]["google_maps_link"]
            .as_str()
            .unwrap()
            .starts_with("https://maps.app.goo.gl/")
    );
}

#[tokio::test]
async fn receipt_upload_consumes_the_draft() {
    let (backend, base, client) = setup().await;
    fill_cart(&client, &base).await;

    client
        .post(format!("{base}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .unwrap();

    let form = reqwest::multipart::Form::new().part(
        "comprobante",
        reqwest::multipart::Part::bytes(b"fake receipt".to_vec())
            .file_name("comprobante.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );
    let response = client
        .post(format!("{base}/pago/comprobante"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack["success"], true);

    // The service got the file for the right order
    {
        let receipts = backend.state.receipts.lock().unwrap();
        assert_eq!(receipts.as_slice(), &[(1, "comprobante.jpg".to_string())]);
    }

    // The draft is consumed: the payment step is gone
    let pago = client.get(format!("{base}/pago")).send().await.unwrap();
    assert_eq!(pago.status().as_u16(), 404);
}

#[tokio::test]
async fn receipt_upload_without_pending_order_is_rejected() {
    let (_backend, base, client) = setup().await;

    let form = reqwest::multipart::Form::new().part(
        "comprobante",
        reqwest::multipart::Part::bytes(b"fake".to_vec()).file_name("x.jpg"),
    );
    let response = client
        .post(format!("{base}/pago/comprobante"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
}

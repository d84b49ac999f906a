//! Integration tests for admin auth glue and order verification.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{Value, json};

use nuevo_estilo_integration_tests::{
    STUB_ADMIN_PASSWORD, client, spawn_admin, spawn_stub_backend, temp_dir,
};

async fn setup() -> (String, reqwest::Client) {
    let backend = spawn_stub_backend().await;
    let addr = spawn_admin(&backend.base_url(), temp_dir("admin-public")).await;
    (format!("http://{addr}"), client())
}

async fn login(client: &reqwest::Client, base: &str) {
    let response = client
        .post(format!("{base}/auth/login"))
        .json(&json!({"username": "admin", "password": STUB_ADMIN_PASSWORD}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn privileged_routes_require_a_session() {
    let (base, client) = setup().await;

    let response = client.get(format!("{base}/pedidos")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn rejected_credentials_do_not_open_a_session() {
    let (base, client) = setup().await;

    let response = client
        .post(format!("{base}/auth/login"))
        .json(&json!({"username": "admin", "password": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let listing = client.get(format!("{base}/pedidos")).send().await.unwrap();
    assert_eq!(listing.status().as_u16(), 401);
}

#[tokio::test]
async fn order_listing_carries_the_projection() {
    let (base, client) = setup().await;
    login(&client, &base).await;

    let body: Value = client
        .get(format!("{base}/pedidos"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["pedidos"].as_array().unwrap().len(), 5);

    // Statuses in the fixture: [absent, pagado, rechazado, pagado,
    // en_revision]; absent counts as pending, sales sum the paid totals.
    let stats = &body["stats"];
    assert_eq!(stats["total"], 5);
    assert_eq!(stats["pendientes"], 1);
    assert_eq!(stats["pagados"], 2);
    assert_eq!(stats["rechazados"], 1);
    assert_eq!(stats["enRevision"], 1);
    assert_eq!(stats["totalVentas"], "30.00");
}

#[tokio::test]
async fn period_filters_are_accepted() {
    let (base, client) = setup().await;
    login(&client, &base).await;

    for periodo in ["todos", "hoy", "semana", "mes"] {
        let response = client
            .get(format!("{base}/pedidos?periodo={periodo}"))
            .send()
            .await
            .unwrap();
        assert!(
            response.status().is_success(),
            "periodo {periodo} failed: {}",
            response.status()
        );
    }
}

#[tokio::test]
async fn payment_can_be_approved_and_rejected() {
    let (base, client) = setup().await;
    login(&client, &base).await;

    let approved: Value = client
        .patch(format!("{base}/pedidos/2/confirmar-pago"))
        .json(&json!({"pago_estado": "pagado"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(approved["pago_estado"], "pagado");

    let rejected: Value = client
        .patch(format!("{base}/pedidos/3/confirmar-pago"))
        .json(&json!({"pago_estado": "rechazado", "observacion": "monto incompleto"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rejected["pago_estado"], "rechazado");
    assert_eq!(rejected["observacion"], "monto incompleto");
}

#[tokio::test]
async fn logout_closes_the_session() {
    let (base, client) = setup().await;
    login(&client, &base).await;

    let response = client
        .post(format!("{base}/auth/logout"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let listing = client.get(format!("{base}/pedidos")).send().await.unwrap();
    assert_eq!(listing.status().as_u16(), 401);
}

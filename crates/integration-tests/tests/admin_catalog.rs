//! Integration tests for the catalog CRUD proxies.

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

fn producto_payload() -> Value {
    json!({
        "name": "Montura Redonda",
        "price": "120.00",
        "image": "/productos/redonda.jpg",
        "color": ["negro", "carey"],
        "marca": "Persol",
        "categoria_id": 1
    })
}

#[tokio::test]
async fn product_listing_is_public_but_writes_are_not() {
    let (base, client) = setup().await;

    // Listing works without a session
    let listing = client.get(format!("{base}/productos")).send().await.unwrap();
    assert!(listing.status().is_success());
    let productos: Value = listing.json().await.unwrap();
    assert_eq!(productos.as_array().unwrap().len(), 3);
    // The dynamically typed color field arrives normalized
    assert_eq!(productos[0]["color"], json!(["negro", "dorado"]));

    // Writing does not
    let response = client
        .post(format!("{base}/productos"))
        .json(&producto_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn product_crud_forwards_the_bearer_token() {
    let (base, client) = setup().await;
    login(&client, &base).await;

    let created: Value = client
        .post(format!("{base}/productos"))
        .json(&producto_payload())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["id"], 99);
    assert_eq!(created["name"], "Montura Redonda");

    let updated: Value = client
        .patch(format!("{base}/productos/99"))
        .json(&producto_payload())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["color"], json!(["negro", "carey"]));

    let deleted: Value = client
        .delete(format!("{base}/productos/99"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted["success"], true);
}

#[tokio::test]
async fn category_crud_roundtrip() {
    let (base, client) = setup().await;
    login(&client, &base).await;

    let payload = json!({"name": "Lentes de Sol", "image": "/categorias/sol.jpg"});

    let created: Value = client
        .post(format!("{base}/categorias"))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["id"], 99);
    assert_eq!(created["name"], "Lentes de Sol");

    let deleted: Value = client
        .delete(format!("{base}/categorias/99"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted["success"], true);
}

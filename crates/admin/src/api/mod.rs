//! Typed client for the remote catalog/order service, admin surface.
//!
//! Every privileged call carries the bearer token the remote service issued
//! at login; the token itself lives in the admin session and is passed per
//! call. Nothing here is cached - the back-office always reads fresh.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use nuevo_estilo_core::{
    Category, CategoryId, ConfirmPaymentRequest, Order, OrderId, Product, ProductId,
};

use crate::config::AdminConfig;

/// Errors that can occur when calling the remote service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// A message safe to show to the back-office user.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => "Error del servicio externo".to_string(),
        }
    }
}

/// Admin credentials forwarded to the remote service.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token issued by the remote service on a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Product create/update payload.
///
/// The `color` list travels in its canonical array form; legacy JSON-encoded
/// strings exist only on the read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: rust_decimal::Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub color: Vec<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub categoria_id: CategoryId,
}

/// Category create/update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// Order listing period filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodFilter {
    #[default]
    Todos,
    Hoy,
    Semana,
    Mes,
}

/// Map a period filter to the order service listing path.
fn period_path(filter: PeriodFilter, today: NaiveDate) -> String {
    match filter {
        PeriodFilter::Todos => "/pedidos".to_string(),
        PeriodFilter::Hoy => format!("/pedidos/dia?fecha={}", today.format("%Y-%m-%d")),
        PeriodFilter::Semana => format!("/pedidos/semana?fecha={}", today.format("%Y-%m-%d")),
        PeriodFilter::Mes => {
            format!("/pedidos/mes?year={}&month={}", today.year(), today.month())
        }
    }
}

/// Client for the admin surface of the remote service.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct BackofficeClient {
    inner: Arc<BackofficeClientInner>,
}

struct BackofficeClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl BackofficeClient {
    /// Create a new client against the configured service base URL.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        Self::with_base_url(config.api_base_url.as_str())
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            inner: Arc::new(BackofficeClientInner {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .request(method, self.url(path))
            .bearer_auth(token)
    }

    /// Decode a response, mapping non-success statuses to `ApiError::Status`
    /// with the service's `message` field when one is present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// Check a response status, discarding the body.
    async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Forward admin credentials to the remote service.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request
    /// fails. Credential verification is entirely the remote service's job.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .inner
            .http
            .post(self.url("/auth/admin/login"))
            .json(credentials)
            .send()
            .await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders for the given period.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_pedidos(
        &self,
        token: &str,
        filter: PeriodFilter,
    ) -> Result<Vec<Order>, ApiError> {
        let path = period_path(filter, chrono::Local::now().date_naive());
        let response = self
            .request(reqwest::Method::GET, &path, token)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Confirm or reject an order's payment proof.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token, decision), fields(pedido_id = %pedido_id))]
    pub async fn confirm_pago(
        &self,
        token: &str,
        pedido_id: OrderId,
        decision: &ConfirmPaymentRequest,
    ) -> Result<Order, ApiError> {
        let response = self
            .request(
                reqwest::Method::PATCH,
                &format!("/pedidos/{pedido_id}/confirmar-pago"),
                token,
            )
            .json(decision)
            .send()
            .await?;
        Self::decode(response).await
    }

    // =========================================================================
    // Catalog CRUD
    // =========================================================================

    /// List all products (fresh, uncached).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_productos(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.inner.http.get(self.url("/productos")).send().await?;
        Self::decode(response).await
    }

    /// List all categories (fresh, uncached).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categorias(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.inner.http.get(self.url("/categorias")).send().await?;
        Self::decode(response).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token, payload), fields(name = %payload.name))]
    pub async fn create_producto(
        &self,
        token: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/productos", token)
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token, payload), fields(producto_id = %producto_id))]
    pub async fn update_producto(
        &self,
        token: &str,
        producto_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        let response = self
            .request(
                reqwest::Method::PATCH,
                &format!("/productos/{producto_id}"),
                token,
            )
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(producto_id = %producto_id))]
    pub async fn delete_producto(&self, token: &str, producto_id: ProductId) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/productos/{producto_id}"),
                token,
            )
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token, payload), fields(name = %payload.name))]
    pub async fn create_categoria(
        &self,
        token: &str,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/categorias", token)
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token, payload), fields(categoria_id = %categoria_id))]
    pub async fn update_categoria(
        &self,
        token: &str,
        categoria_id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        let response = self
            .request(
                reqwest::Method::PATCH,
                &format!("/categorias/{categoria_id}"),
                token,
            )
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(categoria_id = %categoria_id))]
    pub async fn delete_categoria(
        &self,
        token: &str,
        categoria_id: CategoryId,
    ) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/categorias/{categoria_id}"),
                token,
            )
            .send()
            .await?;
        Self::expect_success(response).await
    }
}

/// Build a status error, extracting the service's `message` field.
fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("message") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        })
        .unwrap_or_else(|| body.chars().take(200).collect());

    ApiError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_period_path_all() {
        assert_eq!(period_path(PeriodFilter::Todos, date(2025, 7, 15)), "/pedidos");
    }

    #[test]
    fn test_period_path_day_and_week() {
        assert_eq!(
            period_path(PeriodFilter::Hoy, date(2025, 7, 5)),
            "/pedidos/dia?fecha=2025-07-05"
        );
        assert_eq!(
            period_path(PeriodFilter::Semana, date(2025, 12, 31)),
            "/pedidos/semana?fecha=2025-12-31"
        );
    }

    #[test]
    fn test_period_path_month() {
        assert_eq!(
            period_path(PeriodFilter::Mes, date(2025, 7, 15)),
            "/pedidos/mes?year=2025&month=7"
        );
    }

    #[test]
    fn test_period_filter_wire_values() {
        let filter: PeriodFilter = serde_json::from_str("\"hoy\"").expect("deserialize");
        assert_eq!(filter, PeriodFilter::Hoy);
        assert_eq!(PeriodFilter::default(), PeriodFilter::Todos);
    }

    #[test]
    fn test_status_error_message_extraction() {
        let err = status_error(401, r#"{"message": "Credenciales inválidas"}"#);
        assert_eq!(err.public_message(), "Credenciales inválidas");
    }
}

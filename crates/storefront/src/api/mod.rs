//! Typed client for the remote catalog/order REST service.
//!
//! # Architecture
//!
//! - The remote service is the source of truth - NO local sync, direct API
//!   calls over `reqwest`
//! - Catalog reads are cached in-memory via `moka` (5 minute TTL)
//! - Cart and order calls are never cached (mutable state)
//!
//! # Example
//!
//! ```rust,ignore
//! use nuevo_estilo_storefront::api::StoreApiClient;
//!
//! let client = StoreApiClient::new(&config);
//!
//! let productos = client.get_productos().await?;
//! let created = client.create_pedido(&request).await?;
//! ```

mod cache;
mod catalog;
mod orders;

pub use orders::ReceiptUpload;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::StorefrontConfig;

use cache::CacheValue;

/// Catalog cache time-to-live.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

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
    /// A message safe to show to the end user.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => "Error del servicio externo".to_string(),
        }
    }
}

/// Client for the remote catalog/order service.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct StoreApiClient {
    inner: Arc<StoreApiClientInner>,
}

struct StoreApiClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl StoreApiClient {
    /// Create a new client against the configured service base URL.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_base_url(config.api_base_url.as_str())
    }

    /// Create a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StoreApiClientInner {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// GET a JSON resource.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
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
}

/// Build a status error, extracting the service's `message` field the way
/// the front-end interceptor did (`error.response?.data?.message`).
fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("message") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            // Validation backends report message arrays
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

//! Order methods (not cached - mutable state).

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use nuevo_estilo_core::{CreateOrderRequest, CreatedOrder, OrderId};

use super::{ApiError, StoreApiClient};

/// A payment receipt file forwarded to the order service.
#[derive(Debug)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl StoreApiClient {
    /// Create an order from the current cart lines.
    ///
    /// Prices never travel with the request; the order service prices the
    /// items at order time.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the order or the request
    /// fails. Nothing is retried - the caller resubmits manually.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create_pedido(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreatedOrder, ApiError> {
        self.post_json("/pedidos", request).await
    }

    /// Forward a payment receipt to `POST /pedidos/{id}/comprobante`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails; the caller keeps its draft
    /// context so the upload can be retried.
    #[instrument(skip(self, receipt), fields(pedido_id = %pedido_id, file = %receipt.file_name))]
    pub async fn upload_comprobante(
        &self,
        pedido_id: OrderId,
        receipt: ReceiptUpload,
    ) -> Result<(), ApiError> {
        let mut part = Part::bytes(receipt.bytes).file_name(receipt.file_name);
        if let Some(content_type) = &receipt.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new().part("comprobante", part);

        let response = self
            .inner
            .http
            .post(self.url(&format!("/pedidos/{pedido_id}/comprobante")))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(super::status_error(status.as_u16(), &body));
        }

        Ok(())
    }
}

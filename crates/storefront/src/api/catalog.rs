//! Catalog methods (cached reads).

use tracing::{debug, instrument};

use nuevo_estilo_core::{Category, CategoryId, Product, ProductId};

use super::cache::CacheValue;
use super::{ApiError, StoreApiClient};

impl StoreApiClient {
    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categorias(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categorias".to_string();

        if let Some(CacheValue::Categories(categorias)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categorias");
            return Ok(categorias);
        }

        let categorias: Vec<Category> = self.get_json("/categorias").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categorias.clone()))
            .await;

        Ok(categorias)
    }

    /// Get all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_productos(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "productos".to_string();

        if let Some(CacheValue::Products(productos)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for productos");
            return Ok(productos);
        }

        let productos: Vec<Product> = self.get_json("/productos").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(productos.clone()))
            .await;

        Ok(productos)
    }

    /// Get the products of one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(categoria_id = %categoria_id))]
    pub async fn get_productos_by_categoria(
        &self,
        categoria_id: CategoryId,
    ) -> Result<Vec<Product>, ApiError> {
        let cache_key = format!("productos:categoria:{categoria_id}");

        if let Some(CacheValue::Products(productos)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for productos by categoria");
            return Ok(productos);
        }

        let productos: Vec<Product> = self
            .get_json(&format!("/productos/categoria/{categoria_id}"))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(productos.clone()))
            .await;

        Ok(productos)
    }

    /// Find one product by id in the (cached) product listing.
    ///
    /// The service exposes no single-product endpoint, so this reads
    /// through the listing cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(producto_id = %producto_id))]
    pub async fn find_producto(
        &self,
        producto_id: ProductId,
    ) -> Result<Option<Product>, ApiError> {
        let productos = self.get_productos().await?;
        Ok(productos.into_iter().find(|p| p.id == producto_id))
    }
}

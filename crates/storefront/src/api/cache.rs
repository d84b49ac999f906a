//! Cache value types for the catalog cache.

use nuevo_estilo_core::{Category, Product};

/// Values stored in the catalog cache.
#[derive(Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Categories(Vec<Category>),
}

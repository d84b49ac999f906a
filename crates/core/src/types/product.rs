//! Catalog types supplied by the remote catalog service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;
use super::id::{CategoryId, ProductId};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// The owning category embedded in a product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}

/// A catalog product.
///
/// Cart lines capture a copy of this struct at add time; the snapshot is
/// never re-fetched, so a later catalog edit does not change a cart that
/// already holds the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Tolerates number-or-string upstream encodings; anything
    /// non-numeric coerces to zero.
    #[serde(default, deserialize_with = "de::lenient_decimal")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    /// Declared color variants, normalized to a plain ordered list.
    #[serde(default, deserialize_with = "de::color_list")]
    pub color: Vec<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Absent on the trimmed product snapshots embedded in order details.
    #[serde(default)]
    pub categoria: Option<CategoryRef>,
}

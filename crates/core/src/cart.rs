//! The session cart.
//!
//! A cart is a list of lines keyed by (product id, selected color). Adding
//! the same key again increments the existing line; a different color of
//! the same product is its own line. Each line keeps the product snapshot
//! captured at add time - totals are computed from those snapshots, never
//! from a re-fetch.
//!
//! The struct serializes transparently as the bare line sequence, which is
//! the persisted snapshot format. Loading tolerates malformed snapshots by
//! falling back to `Cart::default()` at the call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{OrderItemInput, Product, ProductId};

/// Errors from cart mutations.
///
/// Expected conditions (missing line, zero quantity) are not errors; the
/// only rejected input is a color selection the product does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("invalid color selection {color:?} for product {producto_id}")]
    InvalidSelection {
        producto_id: ProductId,
        color: String,
    },
}

/// One product+color+quantity entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub producto: Product,
    #[serde(rename = "selectedColor")]
    pub selected_color: String,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal from the captured snapshot price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.producto.price * Decimal::from(self.quantity)
    }

    fn matches(&self, producto_id: ProductId, selected_color: &str) -> bool {
        self.producto.id == producto_id && self.selected_color == selected_color
    }
}

/// The cart for one visitor session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `producto` in `selected_color`.
    ///
    /// Increments the existing line for the same (product, color) key, or
    /// appends a new line with quantity 1 holding a snapshot copy of the
    /// product.
    ///
    /// # Errors
    ///
    /// `InvalidSelection` when the color is not one of the product's
    /// declared variants - including an empty selection while variants
    /// exist, and any non-empty selection when none do.
    pub fn add_item(&mut self, producto: &Product, selected_color: &str) -> Result<(), CartError> {
        let valid = if producto.color.is_empty() {
            selected_color.is_empty()
        } else {
            producto.color.iter().any(|c| c == selected_color)
        };
        if !valid {
            return Err(CartError::InvalidSelection {
                producto_id: producto.id,
                color: selected_color.to_string(),
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(producto.id, selected_color))
        {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                producto: producto.clone(),
                selected_color: selected_color.to_string(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Remove the line for (product, color). No-op when absent.
    pub fn remove_item(&mut self, producto_id: ProductId, selected_color: &str) {
        self.lines
            .retain(|line| !line.matches(producto_id, selected_color));
    }

    /// Replace the quantity of the line for (product, color).
    ///
    /// Zero or negative quantity means deletion, exactly as
    /// [`remove_item`](Self::remove_item). No-op when the line is absent -
    /// this never creates a line.
    pub fn set_quantity(&mut self, producto_id: ProductId, selected_color: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(producto_id, selected_color);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(producto_id, selected_color))
        {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line subtotals over captured snapshot prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities across all lines (badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Build the order-creation items from the current lines.
    ///
    /// Colors collapse here on purpose: the order service tracks products
    /// and quantities only.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItemInput> {
        self.lines
            .iter()
            .map(|line| OrderItemInput {
                producto_id: line.producto.id,
                cantidad: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(id: i32, price: &str, colors: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            price: price.parse().expect("decimal"),
            image: format!("p{id}.jpg"),
            color: colors.iter().map(ToString::to_string).collect(),
            marca: None,
            descripcion: None,
            categoria: None,
        }
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro", "azul"]);

        for _ in 0..4 {
            cart.add_item(&p, "negro").expect("add");
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn test_different_colors_are_distinct_lines() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["rojo", "azul"]);

        cart.add_item(&p, "rojo").expect("add");
        cart.add_item(&p, "azul").expect("add");

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_without_color_when_variants_exist_is_rejected() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro"]);

        let err = cart.add_item(&p, "").expect_err("must reject");
        assert_eq!(
            err,
            CartError::InvalidSelection {
                producto_id: ProductId::new(1),
                color: String::new(),
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_undeclared_color_is_rejected() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro"]);

        assert!(cart.add_item(&p, "verde").is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_colorless_product_with_empty_selection() {
        let mut cart = Cart::default();
        let p = producto(2, "12.50", &[]);

        cart.add_item(&p, "").expect("add");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].selected_color, "");
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro"]);
        cart.add_item(&p, "negro").expect("add");

        cart.set_quantity(p.id, "negro", 7);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro"]);
        cart.add_item(&p, "negro").expect("add");

        cart.set_quantity(p.id, "negro", 0);
        assert!(cart.is_empty());

        cart.add_item(&p, "negro").expect("add");
        cart.set_quantity(p.id, "negro", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_noop() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro"]);
        cart.add_item(&p, "negro").expect("add");

        cart.set_quantity(ProductId::new(99), "negro", 5);
        cart.set_quantity(p.id, "azul", 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &["negro"]);
        cart.add_item(&p, "negro").expect("add");

        cart.remove_item(p.id, "negro");
        let after_first = cart.clone();
        cart.remove_item(p.id, "negro");

        assert_eq!(cart, after_first);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = Cart::default();
        let a = producto(1, "10", &[]);
        let b = producto(2, "5.5", &[]);

        cart.add_item(&a, "").expect("add");
        cart.set_quantity(a.id, "", 2);
        cart.add_item(&b, "").expect("add");

        assert_eq!(cart.total(), "25.5".parse::<Decimal>().expect("decimal"));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total_empty_cart_is_zero() {
        assert_eq!(Cart::default().total(), Decimal::ZERO);
        assert_eq!(Cart::default().item_count(), 0);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut cart = Cart::default();
        let a = producto(1, "10", &["negro", "azul"]);
        let b = producto(2, "5.5", &[]);
        cart.add_item(&a, "negro").expect("add");
        cart.add_item(&a, "azul").expect("add");
        cart.set_quantity(a.id, "azul", 3);
        cart.add_item(&b, "").expect("add");

        let snapshot = serde_json::to_string(&cart).expect("serialize");
        // The snapshot is the bare line array
        assert!(snapshot.starts_with('['));

        let reloaded: Cart = serde_json::from_str(&snapshot).expect("deserialize");
        assert_eq!(reloaded, cart);
        assert_eq!(reloaded.total(), cart.total());
    }

    #[test]
    fn test_malformed_snapshot_falls_back_to_empty() {
        let reloaded = serde_json::from_str::<Cart>("{not valid json").unwrap_or_default();
        assert!(reloaded.is_empty());

        let wrong_shape = serde_json::from_str::<Cart>("{\"cart\": 1}").unwrap_or_default();
        assert!(wrong_shape.is_empty());
    }

    #[test]
    fn test_order_items_collapse_colors() {
        let mut cart = Cart::default();
        let p = producto(4, "20", &["rojo", "azul"]);
        cart.add_item(&p, "rojo").expect("add");
        cart.add_item(&p, "azul").expect("add");
        cart.add_item(&p, "azul").expect("add");

        let items = cart.order_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].cantidad, 1);
        assert_eq!(items[1].cantidad, 2);
        assert!(items.iter().all(|i| i.producto_id == p.id));
    }

    #[test]
    fn test_snapshot_keeps_captured_price() {
        let mut cart = Cart::default();
        let p = producto(1, "10", &[]);
        cart.add_item(&p, "").expect("add");

        // A catalog price change after the add must not affect the line
        let mut updated = p;
        updated.price = "99".parse().expect("decimal");

        assert_eq!(cart.total(), Decimal::from(10));
        assert_eq!(cart.lines()[0].producto.price, Decimal::from(10));
        assert_ne!(cart.lines()[0].producto.price, updated.price);
    }
}

//! Cart and cart item types.

use crate::catalog::{resolve_image_url, Product};
use crate::ids::{CartId, CartItemId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Maximum quantity accepted per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 99;

/// A user's cart.
///
/// Depending on the endpoint the backend names the key `cartId` or `id`;
/// use [`Cart::resolved_id`] rather than either field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<CartId>,
    pub user_id: UserId,
}

impl Cart {
    /// The cart's id, preferring `cartId` over `id`.
    pub fn resolved_id(&self) -> Option<CartId> {
        self.cart_id.or(self.id)
    }
}

/// Product summary embedded in some cart and order payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A row in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_item_id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Price captured when the item was added, if the backend sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

/// A cart item joined with its product for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_item_id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
}

impl CartLine {
    /// Join an item with its product. The item's own price wins over the
    /// product's current price.
    pub fn join(item: &CartItem, product: Option<&Product>, asset_origin: &str) -> Self {
        let name = product
            .map(|p| p.product_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "S\u{1ea3}n ph\u{1ea9}m".to_string());
        let unit_price = item
            .price
            .or_else(|| product.and_then(|p| p.numeric_price()))
            .unwrap_or(0.0);
        Self {
            cart_item_id: item.cart_item_id,
            product_id: item.product_id,
            name,
            image: resolve_image_url(product.and_then(|p| p.image.as_deref()), asset_origin),
            quantity: item.quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Totals over a set of cart lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Number of distinct lines (the header badge count).
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: f64,
}

impl CartSummary {
    pub fn of(lines: &[CartLine]) -> Self {
        Self {
            line_count: lines.len(),
            item_count: lines.iter().map(|l| l.quantity).sum(),
            subtotal: lines.iter().map(CartLine::line_total).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: Option<f64>) -> CartItem {
        CartItem {
            cart_item_id: CartItemId::new(10),
            cart_id: CartId::new(3),
            product_id: ProductId::new(7),
            quantity: 2,
            price,
            product: None,
        }
    }

    #[test]
    fn test_resolved_id_prefers_cart_id() {
        let cart: Cart = serde_json::from_str(r#"{"id": 1, "cartId": 2, "userId": 5}"#).unwrap();
        assert_eq!(cart.resolved_id(), Some(CartId::new(2)));
        let cart: Cart = serde_json::from_str(r#"{"id": 1, "userId": 5}"#).unwrap();
        assert_eq!(cart.resolved_id(), Some(CartId::new(1)));
    }

    #[test]
    fn test_join_uses_item_price_first() {
        let product = Product::new("Pixel 8").with_id(7).with_price(500.0);
        let line = CartLine::join(&item(Some(450.0)), Some(&product), "");
        assert_eq!(line.unit_price, 450.0);
        assert_eq!(line.line_total(), 900.0);

        let line = CartLine::join(&item(None), Some(&product), "");
        assert_eq!(line.unit_price, 500.0);
        assert_eq!(line.name, "Pixel 8");
    }

    #[test]
    fn test_join_without_product() {
        let line = CartLine::join(&item(None), None, "");
        assert_eq!(line.unit_price, 0.0);
        assert_eq!(line.name, "S\u{1ea3}n ph\u{1ea9}m");
        assert!(line.image.is_none());
    }

    #[test]
    fn test_summary() {
        let product = Product::new("x").with_price(100.0);
        let lines = vec![
            CartLine::join(&item(None), Some(&product), ""),
            CartLine::join(&item(Some(50.0)), Some(&product), ""),
        ];
        let summary = CartSummary::of(&lines);
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.item_count, 4);
        assert_eq!(summary.subtotal, 300.0);
    }
}

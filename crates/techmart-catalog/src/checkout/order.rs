//! Order types.

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Order status, carried on the wire as a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed by the shop.
    Confirmed,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn code(&self) -> i32 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Delivered => 3,
            OrderStatus::Cancelled => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Like [`OrderStatus::from_code`], but as a `Result`.
    pub fn try_from_code(code: i32) -> Result<Self, CatalogError> {
        Self::from_code(code).ok_or(CatalogError::UnknownStatus(code))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status name. Unknown names fall back to pending.
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.to_lowercase())
            .unwrap_or_default()
    }

    /// Label shown to Vietnamese-speaking customers.
    pub fn label_vi(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Ch\u{1edd} x\u{e1}c nh\u{1ead}n",
            OrderStatus::Confirmed => "\u{110}\u{e3} x\u{e1}c nh\u{1ead}n",
            OrderStatus::Shipped => "\u{110}ang giao h\u{e0}ng",
            OrderStatus::Delivered => "\u{110}\u{e3} giao h\u{e0}ng",
            OrderStatus::Cancelled => "\u{110}\u{e3} h\u{1ee7}y",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

/// Name for a raw status code, `unknown` when the code is not recognised.
pub fn status_name(code: i32) -> &'static str {
    OrderStatus::from_code(code).map_or("unknown", |s| s.as_str())
}

/// Product summary embedded in order item payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemProduct {
    pub id: ProductId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryName>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryName {
    pub name: String,
}

/// A line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, alias = "orderItemId", skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderItemId>,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price at order time.
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<OrderItemProduct>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// An order as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Raw status code; see [`Order::status`].
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::time::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Decoded status, `None` for codes this client does not know.
    pub fn status(&self) -> Option<OrderStatus> {
        OrderStatus::from_code(self.status)
    }

    /// Name to show for the customer.
    pub fn display_customer(&self) -> String {
        self.customer_name
            .clone()
            .or_else(|| self.user_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("User {}", self.user_id))
    }
}

/// One line of an order-creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub price: f64,
}

/// Body of `PUT /orders/createOrder`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: UserId,
    pub total_amount: f64,
    pub shipping_address: String,
    pub phone: String,
    pub email: String,
    pub order_items: Vec<OrderLineRequest>,
}

/// Reply to order creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderResponse {
    pub id: OrderId,
    #[serde(default)]
    pub message: String,
}

/// One entry of an order's status history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusHistoryEntry {
    pub status: String,
    #[serde(default, deserialize_with = "crate::time::lenient")]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One row of the admin "ordered products" report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProduct {
    pub order_id: Option<OrderId>,
    pub order_date: Option<NaiveDateTime>,
    pub order_status: i32,
    pub customer_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub description: String,
}

impl OrderedProduct {
    /// Build a report row. A missing product degrades to placeholders.
    pub fn build(order: &Order, item: &OrderItem, product: Option<&Product>) -> Self {
        Self {
            order_id: order.id,
            order_date: order.order_date,
            order_status: order.status,
            customer_name: order.display_customer(),
            product_id: item.product_id,
            product_name: product
                .map(|p| p.product_name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Product {}", item.product_id)),
            category: product
                .and_then(|p| p.category.as_ref())
                .map(|c| c.category_name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            quantity: item.quantity,
            unit_price: item.price,
            total_price: item.line_total(),
            description: product
                .and_then(|p| p.description.clone())
                .unwrap_or_default(),
        }
    }
}

/// Order counts and revenue for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    /// Count per status, in [`OrderStatus::ALL`] order.
    pub by_status: Vec<(OrderStatus, usize)>,
    pub unknown_status: usize,
    /// Sum of totals over delivered orders.
    pub delivered_revenue: f64,
    /// Sum of totals over everything not cancelled.
    pub open_value: f64,
}

impl OrderStats {
    pub fn of(orders: &[Order]) -> Self {
        let mut by_status: Vec<(OrderStatus, usize)> =
            OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut stats = OrderStats {
            total: orders.len(),
            ..Default::default()
        };

        for order in orders {
            match order.status() {
                Some(status) => {
                    if let Some(slot) = by_status.iter_mut().find(|(s, _)| *s == status) {
                        slot.1 += 1;
                    }
                    if status == OrderStatus::Delivered {
                        stats.delivered_revenue += order.total_amount;
                    }
                    if status != OrderStatus::Cancelled {
                        stats.open_value += order.total_amount;
                    }
                }
                None => stats.unknown_status += 1,
            }
        }

        stats.by_status = by_status;
        stats
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCategory;

    #[test]
    fn test_status_codes() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(OrderStatus::from_code(9), None);
        assert_eq!(status_name(9), "unknown");
        assert_eq!(status_name(2), "shipped");
        assert_eq!(OrderStatus::try_from_code(7), Err(CatalogError::UnknownStatus(7)));
    }

    #[test]
    fn test_parse_falls_back_to_pending() {
        assert_eq!(OrderStatus::parse("Delivered"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::parse("lost"), OrderStatus::Pending);
    }

    #[test]
    fn test_cancel_rules() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_deserialize_order() {
        let json = r#"{
            "id": 12, "userId": 3, "status": 1, "totalAmount": 1500000,
            "shippingAddress": "1 Le Loi street, Q1, HCM",
            "orderDate": "2024-06-01T09:30:00"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status(), Some(OrderStatus::Confirmed));
        assert!(order.order_date.is_some());
        assert_eq!(order.display_customer(), "User 3");
    }

    #[test]
    fn test_order_item_accepts_either_id_key() {
        let item: OrderItem = serde_json::from_str(
            r#"{"orderItemId": 4, "orderId": 1, "productId": 2, "quantity": 3, "price": 10}"#,
        )
        .unwrap();
        assert_eq!(item.id, Some(OrderItemId::new(4)));
        assert_eq!(item.line_total(), 30.0);
    }

    #[test]
    fn test_ordered_product_row() {
        let order = Order {
            id: Some(OrderId::new(1)),
            user_id: UserId::new(8),
            customer_name: Some("Lan".into()),
            status: 3,
            ..Default::default()
        };
        let item = OrderItem {
            id: None,
            order_id: OrderId::new(1),
            product_id: ProductId::new(5),
            quantity: 2,
            price: 250.0,
            product: None,
        };
        let mut product = Product::new("Galaxy S24").with_id(5);
        product.category = Some(Box::new(ProductCategory::new_root(2, "Phones")));

        let row = OrderedProduct::build(&order, &item, Some(&product));
        assert_eq!(row.customer_name, "Lan");
        assert_eq!(row.category, "Phones");
        assert_eq!(row.total_price, 500.0);

        let row = OrderedProduct::build(&order, &item, None);
        assert_eq!(row.product_name, "Product 5");
        assert_eq!(row.category, "Unknown");
    }

    #[test]
    fn test_stats() {
        let order = |status: i32, total: f64| Order {
            status,
            total_amount: total,
            ..Default::default()
        };
        let stats = OrderStats::of(&[
            order(0, 100.0),
            order(3, 200.0),
            order(3, 300.0),
            order(4, 50.0),
            order(42, 1.0),
        ]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.count(OrderStatus::Delivered), 2);
        assert_eq!(stats.count(OrderStatus::Shipped), 0);
        assert_eq!(stats.unknown_status, 1);
        assert_eq!(stats.delivered_revenue, 500.0);
        assert_eq!(stats.open_value, 600.0);
    }
}

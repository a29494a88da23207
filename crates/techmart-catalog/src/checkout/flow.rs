//! Checkout drafts: what the shopper selected, before an order exists.

use crate::cart::{CartLine, MAX_QUANTITY_PER_ITEM};
use crate::checkout::{CreateOrderRequest, OrderLineRequest, ShippingAddress};
use crate::error::CatalogError;
use crate::ids::{ProductId, UserId};
use crate::search::ProductGroup;
use serde::{Deserialize, Serialize};

/// A line picked for checkout, either from the cart or via "buy now".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub quantity: i64,
    pub price: f64,
    /// Unselected lines stay in the cart and are not ordered.
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl CheckoutItem {
    /// "Buy now" on a listing card: one unit of the representative at the
    /// group's lowest price. Returns `None` if the representative has no id.
    pub fn buy_now(group: &ProductGroup) -> Option<Self> {
        Some(Self {
            product_id: group.representative_id?,
            name: group.name.clone(),
            image: group.image.clone(),
            quantity: 1,
            price: group.min_price,
            selected: true,
        })
    }

    pub fn from_cart_line(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.unit_price,
            selected: true,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Everything needed to place an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    pub user_id: UserId,
    pub items: Vec<CheckoutItem>,
    pub address: ShippingAddress,
    pub phone: String,
    pub email: String,
    /// Flat delivery fee added to the order total.
    #[serde(default)]
    pub shipping_fee: f64,
}

impl CheckoutDraft {
    pub fn new(user_id: UserId, items: Vec<CheckoutItem>, address: ShippingAddress) -> Self {
        Self {
            user_id,
            items,
            address,
            phone: String::new(),
            email: String::new(),
            shipping_fee: 0.0,
        }
    }

    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = phone.into();
        self.email = email.into();
        self
    }

    pub fn with_shipping_fee(mut self, fee: f64) -> Self {
        self.shipping_fee = fee;
        self
    }

    pub fn selected(&self) -> impl Iterator<Item = &CheckoutItem> {
        self.items.iter().filter(|i| i.selected)
    }

    pub fn subtotal(&self) -> f64 {
        self.selected().map(CheckoutItem::line_total).sum()
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> f64 {
        self.subtotal() + self.shipping_fee
    }

    /// Client-side validation; nothing is sent until this passes.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.selected().next().is_none() {
            return Err(CatalogError::EmptyCheckout);
        }
        if let Some(bad) = self
            .selected()
            .find(|i| i.quantity < 1 || i.quantity > MAX_QUANTITY_PER_ITEM)
        {
            return Err(CatalogError::InvalidQuantity {
                product_id: bad.product_id.get(),
                quantity: bad.quantity,
            });
        }
        self.address.validate()?;
        if self.phone.trim().is_empty() {
            return Err(CatalogError::MissingContact("phone"));
        }
        if !self.email.contains('@') {
            return Err(CatalogError::MissingContact("email"));
        }
        Ok(())
    }

    /// Validate and build the order-creation body.
    pub fn to_request(&self) -> Result<CreateOrderRequest, CatalogError> {
        self.validate()?;
        Ok(CreateOrderRequest {
            user_id: self.user_id,
            total_amount: self.total(),
            shipping_address: self.address.compose(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            order_items: self
                .selected()
                .map(|i| OrderLineRequest {
                    product_id: i.product_id,
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::search::{group_products, ProductFilters};

    fn item(id: i64, qty: i64, price: f64) -> CheckoutItem {
        CheckoutItem {
            product_id: ProductId::new(id),
            name: format!("item {}", id),
            image: None,
            quantity: qty,
            price,
            selected: true,
        }
    }

    fn draft(items: Vec<CheckoutItem>) -> CheckoutDraft {
        CheckoutDraft::new(
            UserId::new(1),
            items,
            ShippingAddress::new("12 Nguyen Trai street", "Quan 1", "Ho Chi Minh"),
        )
        .with_contact("0901234567", "lan@example.com")
        .with_shipping_fee(30_000.0)
    }

    #[test]
    fn test_buy_now_uses_min_price() {
        let products = vec![
            Product::new("a").with_id(1).with_group("G").with_price(200.0),
            Product::new("b").with_id(2).with_group("G").with_price(150.0),
        ];
        let groups = group_products(&products, &ProductFilters::new(), &[]);
        let item = CheckoutItem::buy_now(&groups[0]).unwrap();
        assert_eq!(item.product_id, ProductId::new(1));
        assert_eq!(item.price, 150.0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_totals_skip_unselected() {
        let mut skipped = item(3, 1, 999.0);
        skipped.selected = false;
        let d = draft(vec![item(1, 2, 100.0), item(2, 1, 50.0), skipped]);
        assert_eq!(d.subtotal(), 250.0);
        assert_eq!(d.total(), 30_250.0);
    }

    #[test]
    fn test_to_request() {
        let request = draft(vec![item(1, 2, 100.0)]).to_request().unwrap();
        assert_eq!(request.total_amount, 30_200.0);
        assert_eq!(request.order_items.len(), 1);
        assert_eq!(
            request.shipping_address,
            "12 Nguyen Trai street, Quan 1, Ho Chi Minh"
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["orderItems"][0]["productId"], 1);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(draft(vec![]).validate(), Err(CatalogError::EmptyCheckout));
        assert!(matches!(
            draft(vec![item(1, 0, 1.0)]).validate(),
            Err(CatalogError::InvalidQuantity { quantity: 0, .. })
        ));
        let no_email = draft(vec![item(1, 1, 1.0)]).with_contact("0901", "nope");
        assert_eq!(no_email.validate(), Err(CatalogError::MissingContact("email")));
    }
}

//! Product, attribute and accessory types.

use crate::catalog::ProductCategory;
use crate::ids::{AttributeId, CategoryId, ProductId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Product status in the catalog.
///
/// Sent over the wire as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum ProductStatus {
    /// Listed but nothing left to sell.
    OutOfStock,
    /// Product is active and visible.
    #[default]
    Active,
    /// Product is hidden from the storefront.
    Inactive,
}

impl ProductStatus {
    pub fn code(&self) -> i32 {
        match self {
            ProductStatus::OutOfStock => 0,
            ProductStatus::Active => 1,
            ProductStatus::Inactive => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ProductStatus::OutOfStock),
            1 => Some(ProductStatus::Active),
            2 => Some(ProductStatus::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::OutOfStock => "out_of_stock",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }
}

impl TryFrom<i32> for ProductStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown product status {}", code))
    }
}

impl From<ProductStatus> for i32 {
    fn from(status: ProductStatus) -> Self {
        status.code()
    }
}

/// A named attribute attached to a product (e.g., RAM: 16GB).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AttributeId>,
    pub name: String,
    pub value: String,
}

impl ProductAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A product as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend id (absent on create payloads).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Display name.
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Selling price. Missing or malformed prices decode to `None`.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    /// Price before discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    /// Image URL, path, or raw base64 JPEG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub status: ProductStatus,
    /// Variant-family key shared by all configurations of one item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::time::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "crate::time::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Box<ProductCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
}

impl Product {
    /// Create an active product with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            product_name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(ProductId::new(id));
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = Some(quantity);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_group(mut self, group_code: impl Into<String>) -> Self {
        self.group_code = Some(group_code.into());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(CategoryId::new(category_id));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(ProductAttribute::new(name, value));
        self
    }

    /// The variant-family key, if the product belongs to one.
    pub fn group_code(&self) -> Option<&str> {
        self.group_code.as_deref().filter(|code| !code.is_empty())
    }

    /// Price usable for arithmetic: present and finite.
    pub fn numeric_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite())
    }

    /// Stock on hand, missing counted as zero.
    pub fn stock(&self) -> i64 {
        self.stock_quantity.unwrap_or(0)
    }

    /// Look up an attribute by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.attributes
            .iter()
            .find(|a| a.name.to_lowercase() == wanted)
            .map(|a| a.value.as_str())
    }

    /// Check if the product can be sold right now.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Active && self.stock() > 0
    }

    /// Customer rating stored in the `Rating` attribute, 0 when absent or malformed.
    pub fn rating(&self) -> f64 {
        self.attributes
            .iter()
            .find(|a| a.name == "Rating")
            .and_then(|a| a.value.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite())
            .unwrap_or(0.0)
    }

    /// Name up to the first `-`, used when a family has no group code.
    pub fn base_name(&self) -> &str {
        self.product_name
            .split('-')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// First sentence of the description.
    pub fn short_description(&self) -> String {
        self.description
            .as_deref()
            .and_then(|d| d.split('.').next())
            .unwrap_or_default()
            .to_string()
    }

    /// Check if the product sells below its original price.
    pub fn is_on_sale(&self) -> bool {
        match (self.numeric_price(), self.original_price) {
            (Some(price), Some(original)) => original > price,
            _ => false,
        }
    }

    /// Discount off the original price, in whole percent.
    pub fn discount_percentage(&self) -> Option<f64> {
        if !self.is_on_sale() {
            return None;
        }
        let price = self.numeric_price()?;
        let original = self.original_price?;
        Some(((original - price) / original * 100.0).round())
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()))
}

/// A product-to-accessory link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAccessory {
    pub main_product_id: ProductId,
    pub accessory_product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_product: Option<Product>,
}

/// An attribute row from the standalone attribute resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AttributeId>,
    pub product_id: ProductId,
    pub attribute_name: String,
    pub attribute_value: String,
}

impl From<&AttributeRecord> for ProductAttribute {
    fn from(record: &AttributeRecord) -> Self {
        ProductAttribute {
            id: record.id,
            name: record.attribute_name.clone(),
            value: record.attribute_value.clone(),
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> PageResponse<T> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_product() {
        let json = r#"{
            "id": 7,
            "productName": "Asus ROG Strix - 16GB/512GB",
            "price": 32990000,
            "stockQuantity": 4,
            "categoryId": 21,
            "status": 1,
            "groupCode": "ROG-STRIX",
            "brand": "ASUS ROG",
            "createdAt": "2024-03-01T08:00:00",
            "attributes": [{"name": "RAM", "value": "16GB"}]
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, Some(ProductId::new(7)));
        assert_eq!(p.group_code(), Some("ROG-STRIX"));
        assert_eq!(p.attribute("ram"), Some("16GB"));
        assert_eq!(p.status, ProductStatus::Active);
        assert!(p.created_at.is_some());
    }

    #[test]
    fn test_non_numeric_price_decodes_to_none() {
        let p: Product =
            serde_json::from_str(r#"{"productName": "x", "price": "call us"}"#).unwrap();
        assert_eq!(p.price, None);
        let p: Product = serde_json::from_str(r#"{"productName": "x", "price": null}"#).unwrap();
        assert_eq!(p.price, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_str::<Product>(r#"{"productName": "x", "status": 9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_serializes_as_code() {
        assert_eq!(serde_json::to_string(&ProductStatus::Inactive).unwrap(), "2");
    }

    #[test]
    fn test_empty_group_code_is_none() {
        let p = Product::new("x").with_group("");
        assert_eq!(p.group_code(), None);
    }

    #[test]
    fn test_base_name_and_short_description() {
        let p = Product::new("iPhone 15 - 128GB - Blue")
            .with_description("Titanium design. A17 chip.");
        assert_eq!(p.base_name(), "iPhone 15");
        assert_eq!(p.short_description(), "Titanium design");
    }

    #[test]
    fn test_rating_attribute() {
        assert_eq!(Product::new("x").with_attribute("Rating", "4.5").rating(), 4.5);
        assert_eq!(Product::new("x").with_attribute("Rating", "n/a").rating(), 0.0);
        assert_eq!(Product::new("x").rating(), 0.0);
    }

    #[test]
    fn test_on_sale() {
        let mut p = Product::new("x").with_price(80.0);
        assert!(!p.is_on_sale());
        p.original_price = Some(100.0);
        assert!(p.is_on_sale());
        assert_eq!(p.discount_percentage(), Some(20.0));
    }

    #[test]
    fn test_availability() {
        assert!(Product::new("x").with_stock(1).is_available());
        assert!(!Product::new("x").is_available());
    }

    #[test]
    fn test_page_response() {
        let page: PageResponse<Product> = serde_json::from_str(
            r#"{"items": [], "totalItems": 30, "totalPages": 3, "currentPage": 1, "pageSize": 10}"#,
        )
        .unwrap();
        assert!(page.has_next());
    }
}

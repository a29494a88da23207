//! Variant families and the product compare list.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product together with every configuration of the same item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFamily {
    pub main_product: Product,
    /// Never empty: falls back to the main product alone.
    pub variants: Vec<Product>,
}

impl VariantFamily {
    /// A product with no group code stands alone.
    pub fn standalone(product: Product) -> Self {
        Self {
            variants: vec![product.clone()],
            main_product: product,
        }
    }

    /// Build a family from the fetched group; an empty fetch means the
    /// product is its only variant.
    pub fn from_group(product: Product, group: Vec<Product>) -> Self {
        if group.is_empty() {
            Self::standalone(product)
        } else {
            Self {
                main_product: product,
                variants: group,
            }
        }
    }

    /// Variants other than the main product.
    pub fn siblings(&self) -> impl Iterator<Item = &Product> {
        let main_id = self.main_product.id;
        self.variants
            .iter()
            .filter(move |v| main_id.is_none() || v.id != main_id)
    }

    /// Cheapest variant with stock on hand.
    pub fn cheapest_available(&self) -> Option<&Product> {
        self.variants
            .iter()
            .filter(|v| v.is_available())
            .filter(|v| v.numeric_price().is_some())
            .min_by(|a, b| {
                a.numeric_price()
                    .partial_cmp(&b.numeric_price())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Maximum number of products compared side by side.
pub const MAX_COMPARE: usize = 3;

/// Products picked for side-by-side comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompareList {
    products: Vec<Product>,
}

impl CompareList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product. Returns false if it is already listed or the list is full.
    pub fn add(&mut self, product: Product) -> bool {
        if self.products.len() >= MAX_COMPARE || self.contains(product.id) {
            return false;
        }
        self.products.push(product);
        true
    }

    pub fn remove(&mut self, id: Option<ProductId>) {
        self.products.retain(|p| p.id != id);
    }

    pub fn contains(&self, id: Option<ProductId>) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_falls_back_to_product() {
        let main = Product::new("x").with_id(1);
        let family = VariantFamily::from_group(main.clone(), Vec::new());
        assert_eq!(family.variants, vec![main]);
        assert_eq!(family.siblings().count(), 0);
    }

    #[test]
    fn test_siblings_and_cheapest() {
        let main = Product::new("a").with_id(1).with_price(200.0).with_stock(1);
        let group = vec![
            main.clone(),
            Product::new("b").with_id(2).with_price(150.0).with_stock(2),
            Product::new("c").with_id(3).with_price(100.0).with_stock(0),
        ];
        let family = VariantFamily::from_group(main, group);
        assert_eq!(family.siblings().count(), 2);
        assert_eq!(family.cheapest_available().and_then(|p| p.id), Some(ProductId::new(2)));
    }

    #[test]
    fn test_compare_list_limits() {
        let mut list = CompareList::new();
        assert!(list.add(Product::new("a").with_id(1)));
        assert!(!list.add(Product::new("a").with_id(1)));
        assert!(list.add(Product::new("b").with_id(2)));
        assert!(list.add(Product::new("c").with_id(3)));
        assert!(!list.add(Product::new("d").with_id(4)));
        assert_eq!(list.len(), MAX_COMPARE);

        list.remove(Some(ProductId::new(2)));
        assert!(!list.contains(Some(ProductId::new(2))));
        list.clear();
        assert!(list.is_empty());
    }
}

//! Listing filters.

use crate::catalog::Product;
use crate::search::Facet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-selected filters for a category listing.
///
/// Every field is optional; an unset or empty field does not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    /// Case-insensitive substring of the brand.
    #[serde(default)]
    pub brand: Option<String>,
    /// Case-insensitive substring of the product name.
    #[serde(default)]
    pub search_text: Option<String>,
    /// Facet name to case-insensitive value substring.
    #[serde(default)]
    pub attribute_filters: BTreeMap<String, String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl ProductFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute_filters.insert(name.into(), value.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Check whether any filter is active.
    pub fn is_empty(&self) -> bool {
        active(&self.brand).is_none()
            && active(&self.search_text).is_none()
            && self.attribute_filters.values().all(|v| v.is_empty())
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Check whether a product passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.brand_matches(product)
            && self.search_matches(product)
            && self.attributes_match(product)
            && self.price_matches(product)
    }

    fn brand_matches(&self, product: &Product) -> bool {
        match active(&self.brand) {
            None => true,
            Some(wanted) => product
                .brand
                .as_deref()
                .is_some_and(|brand| contains_ignore_case(brand, wanted)),
        }
    }

    fn search_matches(&self, product: &Product) -> bool {
        match active(&self.search_text) {
            None => true,
            Some(text) => contains_ignore_case(&product.product_name, text),
        }
    }

    fn attributes_match(&self, product: &Product) -> bool {
        self.attribute_filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(name, value)| {
                Facet::resolve(name)
                    .value_of(product)
                    .is_some_and(|actual| contains_ignore_case(actual, value))
            })
    }

    /// Each bound applies on its own; with neither set this is a no-op.
    fn price_matches(&self, product: &Product) -> bool {
        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }
        let Some(price) = product.numeric_price() else {
            return false;
        };
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Product {
        Product::new("Asus ROG Strix G16")
            .with_id(1)
            .with_brand("ASUS ROG")
            .with_price(30_000_000.0)
            .with_attribute("RAM", "16GB DDR5")
            .with_attribute("Storage", "1TB SSD")
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = ProductFilters::new();
        assert!(filters.is_empty());
        assert!(filters.matches(&laptop()));
        assert!(filters.matches(&Product::new("no price, no brand")));
    }

    #[test]
    fn test_brand_is_case_insensitive_substring() {
        let filters = ProductFilters::new().with_brand("Asus");
        assert!(filters.matches(&laptop()));
        assert!(!filters.matches(&laptop().with_brand("Dell")));
        assert!(!filters.matches(&Product::new("unbranded")));
    }

    #[test]
    fn test_empty_string_is_inactive() {
        let filters = ProductFilters::new().with_brand("").with_search("");
        assert!(filters.is_empty());
        assert!(filters.matches(&Product::new("x")));
    }

    #[test]
    fn test_search_text() {
        assert!(ProductFilters::new().with_search("strix").matches(&laptop()));
        assert!(!ProductFilters::new().with_search("zenbook").matches(&laptop()));
    }

    #[test]
    fn test_attribute_filter() {
        assert!(ProductFilters::new().with_attribute("ram", "16gb").matches(&laptop()));
        assert!(!ProductFilters::new().with_attribute("RAM", "32GB").matches(&laptop()));
        assert!(!ProductFilters::new().with_attribute("Color", "Black").matches(&laptop()));
    }

    #[test]
    fn test_attribute_filter_uses_alias() {
        let p = Product::new("x").with_attribute("\u{1ed5} c\u{1ee9}ng", "512GB");
        assert!(ProductFilters::new().with_attribute("Storage", "512").matches(&p));
    }

    #[test]
    fn test_no_bounds_keeps_any_price() {
        let filters = ProductFilters::new();
        assert!(filters.matches(&Product::new("x").with_price(-1.0)));
        assert!(filters.matches(&Product::new("x").with_price(f64::MAX)));
    }

    #[test]
    fn test_single_bound() {
        let min_only = ProductFilters::new().with_price_range(Some(100.0), None);
        assert!(min_only.matches(&Product::new("x").with_price(150.0)));
        assert!(!min_only.matches(&Product::new("x").with_price(50.0)));

        let max_only = ProductFilters::new().with_price_range(None, Some(100.0));
        assert!(max_only.matches(&Product::new("x").with_price(100.0)));
        assert!(!max_only.matches(&Product::new("x").with_price(100.5)));
    }

    #[test]
    fn test_bounds_exclude_missing_price() {
        let filters = ProductFilters::new().with_price_range(Some(0.0), Some(100.0));
        assert!(!filters.matches(&Product::new("x")));
        assert!(!filters.matches(&Product::new("x").with_price(f64::NAN)));
    }
}

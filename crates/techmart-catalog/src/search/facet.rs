//! Facets: named attributes used for filtering and display.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A named product attribute shown on listings and offered as a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    /// Canonical name (e.g., "Storage").
    pub name: String,
    /// Other attribute names that mean the same thing.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Facet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn ram() -> Self {
        Facet::new("RAM")
    }

    /// Storage; the backend's Vietnamese data also labels it "ổ cứng".
    pub fn storage() -> Self {
        Facet::new("Storage").with_alias("\u{1ed5} c\u{1ee9}ng")
    }

    pub fn color() -> Self {
        Facet::new("Color")
    }

    /// Facets shown on the laptop and phone listings.
    pub fn standard() -> Vec<Facet> {
        vec![Facet::ram(), Facet::storage(), Facet::color()]
    }

    /// Check whether an attribute name refers to this facet, ignoring case.
    pub fn matches_name(&self, attribute_name: &str) -> bool {
        let wanted = attribute_name.to_lowercase();
        self.name.to_lowercase() == wanted || self.aliases.iter().any(|a| a.to_lowercase() == wanted)
    }

    /// Value of this facet on a product, honouring aliases.
    pub fn value_of<'a>(&self, product: &'a Product) -> Option<&'a str> {
        product
            .attributes
            .iter()
            .find(|a| self.matches_name(&a.name))
            .map(|a| a.value.as_str())
    }

    /// Resolve a filter name to a known facet, or a plain facet without aliases.
    pub fn resolve(name: &str) -> Facet {
        Facet::standard()
            .into_iter()
            .find(|f| f.matches_name(name))
            .unwrap_or_else(|| Facet::new(name))
    }
}

/// A facet value pulled from a group's representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub name: String,
    /// `None` when the representative lacks the attribute.
    pub value: Option<String>,
}

/// Distinct values offered in the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetOptions {
    pub brands: Vec<String>,
    /// Distinct values per facet, in facet order.
    pub values: Vec<(String, Vec<String>)>,
}

impl FacetOptions {
    /// Options for one facet by name, ignoring case.
    pub fn values_for(&self, facet: &str) -> &[String] {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(facet))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }
}

/// Collect brands and facet values across an unfiltered product list.
///
/// Values keep first-seen order and are deduplicated exactly.
pub fn extract_facet_options(products: &[Product], facets: &[Facet]) -> FacetOptions {
    let mut brands: Vec<String> = Vec::new();
    let mut values: Vec<(String, Vec<String>)> =
        facets.iter().map(|f| (f.name.clone(), Vec::new())).collect();

    for product in products {
        if let Some(brand) = product.brand.as_deref().filter(|b| !b.is_empty()) {
            push_unique(&mut brands, brand);
        }
        for attribute in &product.attributes {
            for (facet, seen) in facets.iter().zip(values.iter_mut()) {
                if facet.matches_name(&attribute.name) {
                    push_unique(&mut seen.1, &attribute.value);
                }
            }
        }
    }

    FacetOptions { brands, values }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_alias() {
        let storage = Facet::storage();
        assert!(storage.matches_name("storage"));
        assert!(storage.matches_name("\u{1ed4} C\u{1ee8}NG"));
        assert!(!storage.matches_name("ram"));
    }

    #[test]
    fn test_value_of_uses_alias() {
        let p = Product::new("x").with_attribute("\u{1ed5} c\u{1ee9}ng", "512GB");
        assert_eq!(Facet::storage().value_of(&p), Some("512GB"));
        assert_eq!(Facet::ram().value_of(&p), None);
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(Facet::resolve("ram"), Facet::ram());
        assert_eq!(Facet::resolve("GPU"), Facet::new("GPU"));
    }

    #[test]
    fn test_extract_options() {
        let products = vec![
            Product::new("a").with_brand("Dell").with_attribute("RAM", "8GB"),
            Product::new("b").with_brand("Asus").with_attribute("ram", "16GB"),
            Product::new("c")
                .with_brand("Dell")
                .with_attribute("RAM", "8GB")
                .with_attribute("Storage", "512GB"),
            Product::new("d"),
        ];
        let options = extract_facet_options(&products, &Facet::standard());
        assert_eq!(options.brands, vec!["Dell", "Asus"]);
        assert_eq!(options.values_for("RAM"), ["8GB", "16GB"]);
        assert_eq!(options.values_for("storage"), ["512GB"]);
        assert!(options.values_for("Color").is_empty());
        assert!(options.values_for("GPU").is_empty());
    }
}

//! Sort options for grouped listings.

use crate::search::ProductGroup;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort options for display groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Keep the backend's order.
    #[default]
    Position,
    /// Sort by lowest variant price, low to high.
    PriceAsc,
    /// Sort by lowest variant price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Most stock first.
    Stock,
}

impl SortOption {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Position => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::Stock => "In Stock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "position" | "featured" => Some(SortOption::Position),
            "price_asc" => Some(SortOption::PriceAsc),
            "price_desc" => Some(SortOption::PriceDesc),
            "name_asc" | "name" => Some(SortOption::NameAsc),
            "stock" => Some(SortOption::Stock),
            _ => None,
        }
    }

    /// Sort groups in place. The sort is stable, so ties keep listing order.
    pub fn apply(&self, groups: &mut [ProductGroup]) {
        match self {
            SortOption::Position => {}
            SortOption::PriceAsc => groups.sort_by(|a, b| cmp_f64(a.min_price, b.min_price)),
            SortOption::PriceDesc => groups.sort_by(|a, b| cmp_f64(b.min_price, a.min_price)),
            SortOption::NameAsc => {
                groups.sort_by_key(|g| g.name.to_lowercase());
            }
            SortOption::Stock => groups.sort_by(|a, b| b.total_stock.cmp(&a.total_stock)),
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::search::{group_products, ProductFilters};

    fn groups() -> Vec<ProductGroup> {
        let products = vec![
            Product::new("b").with_id(1).with_group("Beta").with_price(300.0).with_stock(1),
            Product::new("a").with_id(2).with_group("alpha").with_price(100.0).with_stock(9),
            Product::new("c").with_id(3).with_group("Gamma").with_price(100.0).with_stock(4),
        ];
        group_products(&products, &ProductFilters::new(), &[])
    }

    fn names(groups: &[ProductGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_position_keeps_order() {
        let mut g = groups();
        SortOption::Position.apply(&mut g);
        assert_eq!(names(&g), vec!["Beta", "alpha", "Gamma"]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let mut g = groups();
        SortOption::PriceAsc.apply(&mut g);
        assert_eq!(names(&g), vec!["alpha", "Gamma", "Beta"]);
        SortOption::PriceDesc.apply(&mut g);
        assert_eq!(names(&g), vec!["Beta", "alpha", "Gamma"]);
    }

    #[test]
    fn test_name_and_stock() {
        let mut g = groups();
        SortOption::NameAsc.apply(&mut g);
        assert_eq!(names(&g), vec!["alpha", "Beta", "Gamma"]);
        SortOption::Stock.apply(&mut g);
        assert_eq!(names(&g), vec!["alpha", "Gamma", "Beta"]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(SortOption::from_str("price-asc"), Some(SortOption::PriceAsc));
        assert_eq!(SortOption::from_str("FEATURED"), Some(SortOption::Position));
        assert_eq!(SortOption::from_str("random"), None);
    }
}

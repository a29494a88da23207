//! Variant grouping.
//!
//! Category listings show one card per variant family rather than one per
//! product. A listing run is three passes over already-fetched products:
//!
//! 1. filter the flat list with [`ProductFilters`];
//! 2. partition the survivors by group code, keeping first-encounter order;
//! 3. aggregate each partition into a [`ProductGroup`].
//!
//! Nothing is cached between runs, so aggregates always reflect the current
//! filter selection.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::search::{Facet, FacetValue, ProductFilters};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key a product is grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    /// Shared, non-empty group code.
    Code(String),
    /// A product without a group code, keyed by its own id.
    Product(ProductId),
    /// A product with neither group code nor id, keyed by its position in
    /// the filtered list.
    Position(usize),
}

impl GroupKey {
    pub fn for_product(product: &Product, position: usize) -> Self {
        match (product.group_code(), product.id) {
            (Some(code), _) => GroupKey::Code(code.to_string()),
            (None, Some(id)) => GroupKey::Product(id),
            (None, None) => GroupKey::Position(position),
        }
    }

    /// String form used as the group's code in views (`product-{id}` for
    /// ungrouped products).
    pub fn as_code(&self) -> String {
        match self {
            GroupKey::Code(code) => code.clone(),
            GroupKey::Product(id) => format!("product-{}", id),
            GroupKey::Position(pos) => format!("product-#{}", pos),
        }
    }
}

/// A display group: one variant family after filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub key: GroupKey,
    /// Group code, or `product-{id}` for singleton groups.
    pub group_code: String,
    /// Group code if present, else the representative's base name.
    pub name: String,
    /// First product encountered for this key.
    pub representative: Product,
    pub representative_id: Option<ProductId>,
    /// Ids of every filtered member, in encounter order.
    pub member_ids: Vec<ProductId>,
    pub member_count: usize,
    /// Lowest numeric price among members; 0 when none are numeric.
    pub min_price: f64,
    /// Highest numeric price among members; 0 when none are numeric.
    pub max_price: f64,
    /// Sum of member stock, missing counted as zero.
    pub total_stock: i64,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub short_description: String,
    /// Facet values taken from the representative only.
    pub attributes: Vec<FacetValue>,
}

impl ProductGroup {
    /// Facet value by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .and_then(|f| f.value.as_deref())
    }

    /// Check whether members differ in price.
    pub fn has_price_range(&self) -> bool {
        self.min_price < self.max_price
    }

    fn from_members(key: GroupKey, members: &[&Product], facets: &[Facet]) -> Self {
        let representative = members[0];

        let prices: Vec<f64> = members.iter().filter_map(|p| p.numeric_price()).collect();
        let (min_price, max_price) = if prices.is_empty() {
            (0.0, 0.0)
        } else {
            prices
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                    (lo.min(p), hi.max(p))
                })
        };

        let attributes = facets
            .iter()
            .map(|facet| FacetValue {
                name: facet.name.clone(),
                value: facet.value_of(representative).map(str::to_string),
            })
            .collect();

        let name = match &key {
            GroupKey::Code(code) => code.clone(),
            _ => representative.base_name().to_string(),
        };

        ProductGroup {
            group_code: key.as_code(),
            name,
            representative: representative.clone(),
            representative_id: representative.id,
            member_ids: members.iter().filter_map(|p| p.id).collect(),
            member_count: members.len(),
            min_price,
            max_price,
            total_stock: members
                .iter()
                .fold(0i64, |total, p| total.saturating_add(p.stock())),
            image: representative.image.clone(),
            brand: representative.brand.clone(),
            short_description: representative.short_description(),
            attributes,
            key,
        }
    }
}

/// Filter pass: keep products passing every active filter, in input order.
pub fn filter_products<'a>(products: &'a [Product], filters: &ProductFilters) -> Vec<&'a Product> {
    products.iter().filter(|p| filters.matches(p)).collect()
}

/// Group and aggregate an already-filtered list.
pub fn group_filtered(filtered: &[&Product], facets: &[Facet]) -> Vec<ProductGroup> {
    let mut order: Vec<GroupKey> = Vec::new();
    let mut members: HashMap<GroupKey, Vec<&Product>> = HashMap::new();

    for (position, &product) in filtered.iter().enumerate() {
        let key = GroupKey::for_product(product, position);
        members
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(product);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let group = members.remove(&key)?;
            Some(ProductGroup::from_members(key, &group, facets))
        })
        .collect()
}

/// Run all three passes: filter, group, aggregate.
pub fn group_products(
    products: &[Product],
    filters: &ProductFilters,
    facets: &[Facet],
) -> Vec<ProductGroup> {
    let filtered = filter_products(products, filters);
    let groups = group_filtered(&filtered, facets);
    tracing::trace!(
        input = products.len(),
        filtered = filtered.len(),
        groups = groups.len(),
        "grouped listing"
    );
    groups
}

//! Search module.
//!
//! Listing filters, facets, and the variant grouping engine used by the
//! category pages.

mod facet;
mod filter;
mod group;
mod handoff;
mod sort;
mod variants;

pub use facet::{extract_facet_options, Facet, FacetOptions, FacetValue};
pub use filter::ProductFilters;
pub use group::{filter_products, group_filtered, group_products, GroupKey, ProductGroup};
pub use handoff::{HomeSearch, SearchHandoff};
pub use sort::SortOption;
pub use variants::{CompareList, VariantFamily, MAX_COMPARE};

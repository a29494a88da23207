//! Search hand-off from the homepage search form to a category listing.
//!
//! The homepage collects a brand, a free-text query and a price range, then
//! sends the shopper to a listing that should open pre-filtered. The hand-off
//! is read exactly once: the listing takes it and the slot is cleared.

use crate::error::CatalogError;
use crate::search::ProductFilters;
use serde::{Deserialize, Serialize};

/// What the homepage search form submits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSearch {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    /// Zero means "no bound".
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Zero means "no bound".
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl HomeSearch {
    /// Translate the form into listing filters.
    pub fn into_filters(self) -> ProductFilters {
        let bound = |v: Option<f64>| v.filter(|p| p.is_finite() && *p > 0.0);
        ProductFilters {
            brand: self.brand.filter(|b| !b.is_empty()),
            search_text: self.search.filter(|s| !s.is_empty()),
            min_price: bound(self.min_price),
            max_price: bound(self.max_price),
            ..Default::default()
        }
    }
}

/// Single-slot, read-once store for a pending search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHandoff {
    pending: Option<HomeSearch>,
}

impl SearchHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a search, replacing any pending one.
    pub fn put(&mut self, search: HomeSearch) {
        self.pending = Some(search);
    }

    /// Take the pending search, leaving the slot empty.
    pub fn take(&mut self) -> Option<HomeSearch> {
        self.pending.take()
    }

    /// Look at the pending search without consuming it.
    pub fn peek(&self) -> Option<&HomeSearch> {
        self.pending.as_ref()
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_is_read_once() {
        let mut handoff = SearchHandoff::new();
        handoff.put(HomeSearch {
            brand: Some("Asus".into()),
            ..Default::default()
        });
        assert!(handoff.peek().is_some());
        assert!(handoff.take().is_some());
        assert!(handoff.take().is_none());
    }

    #[test]
    fn test_zero_bounds_are_unset() {
        let filters = HomeSearch {
            brand: Some(String::new()),
            search: Some("rog".into()),
            min_price: Some(0.0),
            max_price: Some(20_000_000.0),
        }
        .into_filters();
        assert_eq!(filters.brand, None);
        assert_eq!(filters.search_text.as_deref(), Some("rog"));
        assert_eq!(filters.min_price, None);
        assert_eq!(filters.max_price, Some(20_000_000.0));
    }

    #[test]
    fn test_json_roundtrip_keeps_pending() {
        let mut handoff = SearchHandoff::new();
        handoff.put(HomeSearch {
            search: Some("iphone".into()),
            ..Default::default()
        });
        let restored = SearchHandoff::from_json(&handoff.to_json().unwrap()).unwrap();
        assert_eq!(restored, handoff);
    }

    #[test]
    fn test_form_payload_decodes() {
        let search: HomeSearch =
            serde_json::from_str(r#"{"brand": "Dell", "minPrice": 0, "maxPrice": 0}"#).unwrap();
        assert!(search.into_filters().min_price.is_none());
    }
}

//! Shipping address encoding.
//!
//! Orders carry the address as one string:
//! `"{street}, {district}, {city}"`, optionally followed by
//! `", Ghi chú: {note}"`. The checkout page re-fills its form from that
//! string when an unpaid order is retried.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Label that introduces the delivery note.
pub const NOTE_LABEL: &str = "Ghi ch\u{fa}:";

/// Minimum length of the street line.
pub const MIN_STREET_LEN: usize = 10;

/// A structured shipping address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub district: String,
    pub city: String,
    pub note: Option<String>,
}

impl ShippingAddress {
    pub fn new(
        street: impl Into<String>,
        district: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            district: district.into(),
            city: city.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }

    /// Check the fields the checkout form requires.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.street.trim().chars().count() < MIN_STREET_LEN {
            return Err(CatalogError::InvalidAddress(format!(
                "street must be at least {} characters",
                MIN_STREET_LEN
            )));
        }
        if self.district.trim().is_empty() {
            return Err(CatalogError::InvalidAddress("district is required".into()));
        }
        if self.city.trim().is_empty() {
            return Err(CatalogError::InvalidAddress("city is required".into()));
        }
        Ok(())
    }

    /// Encode as the single-line form stored on orders.
    pub fn compose(&self) -> String {
        let mut line = format!("{}, {}, {}", self.street, self.district, self.city);
        if let Some(note) = &self.note {
            line.push_str(&format!(", {} {}", NOTE_LABEL, note));
        }
        line
    }

    /// Decode a stored address line. Missing parts come back empty.
    pub fn parse(line: &str) -> Self {
        let parts: Vec<&str> = line.split(',').collect();
        let part = |i: usize| parts.get(i).map(|s| s.trim().to_string()).unwrap_or_default();
        let note = line
            .find(NOTE_LABEL)
            .map(|idx| line[idx + NOTE_LABEL.len()..].trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            street: part(0),
            district: part(1),
            city: part(2),
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_without_note() {
        let addr = ShippingAddress::new("12 Nguyen Trai street", "Quan 1", "Ho Chi Minh");
        assert_eq!(addr.compose(), "12 Nguyen Trai street, Quan 1, Ho Chi Minh");
    }

    #[test]
    fn test_compose_and_parse_with_note() {
        let addr = ShippingAddress::new("12 Nguyen Trai street", "Quan 1", "Ho Chi Minh")
            .with_note("call before delivery");
        let line = addr.compose();
        assert!(line.ends_with("Ghi ch\u{fa}: call before delivery"));
        assert_eq!(ShippingAddress::parse(&line), addr);
    }

    #[test]
    fn test_blank_note_is_dropped() {
        let addr = ShippingAddress::new("a", "b", "c").with_note("   ");
        assert_eq!(addr.note, None);
    }

    #[test]
    fn test_parse_partial_line() {
        let addr = ShippingAddress::parse("only a street");
        assert_eq!(addr.street, "only a street");
        assert_eq!(addr.district, "");
        assert_eq!(addr.city, "");
        assert_eq!(addr.note, None);
    }

    #[test]
    fn test_validate() {
        assert!(ShippingAddress::new("12 Nguyen Trai", "Q1", "HCM").validate().is_ok());
        assert!(matches!(
            ShippingAddress::new("short", "Q1", "HCM").validate(),
            Err(CatalogError::InvalidAddress(_))
        ));
        assert!(ShippingAddress::new("12 Nguyen Trai", "", "HCM").validate().is_err());
    }
}

//! Price formatting.
//!
//! The backend sends prices as plain JSON numbers in Vietnamese dong, which
//! has no minor unit. Amounts are kept as `f64` on the wire types and rounded
//! to whole dong only for display.

use std::fmt;

/// A price in dong, formatted as `1.500.000 ₫`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Vnd(pub f64);

impl Vnd {
    /// Round to whole dong.
    pub fn whole(&self) -> i64 {
        self.0.round() as i64
    }

    /// Format without the currency symbol (e.g., "1.500.000").
    pub fn display_amount(&self) -> String {
        let whole = self.whole();
        let digits = whole.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if whole < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    }
}

impl fmt::Display for Vnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \u{20ab}", self.display_amount())
    }
}

/// Format a price range, collapsing it when both ends are equal.
pub fn format_range(min: f64, max: f64) -> String {
    if Vnd(min).whole() == Vnd(max).whole() {
        Vnd(min).to_string()
    } else {
        format!("{} - {}", Vnd(min), Vnd(max))
    }
}

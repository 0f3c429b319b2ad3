//! Currency amounts as whole cents.
//!
//! Prices are computed in `f64` (the book formula multiplies fractional
//! rates) and converted to cents exactly once, at the end of a quote. Storing
//! cents afterwards keeps quotes comparable with `==` and keeps the business
//! card table exact.

use serde::{Serialize, Serializer};
use std::fmt;

/// A non-negative amount of US dollars, stored as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Round a dollar amount to the nearest cent (halves away from zero).
    pub fn from_dollars(dollars: f64) -> Self {
        Self {
            cents: (dollars * 100.0).round() as i64,
        }
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    pub fn as_dollars(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Serialized as a plain decimal dollar amount (`3.82`), the shape the
/// storefront's JSON consumers expect.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

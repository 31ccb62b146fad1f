//! Departure domain types.

use std::fmt;

use chrono::{DateTime, FixedOffset};

/// Transit product category of a line.
///
/// This is a closed set: anything the data source reports that isn't one
/// of the four city modes (regional trains, ferries, missing data, ...)
/// lands in [`ProductCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Bus,
    /// U-Bahn
    Subway,
    Tram,
    /// S-Bahn
    Suburban,
    Other,
}

impl ProductCategory {
    /// Map a HAFAS product string to a category.
    pub fn from_product(product: &str) -> Self {
        match product {
            "bus" => Self::Bus,
            "subway" => Self::Subway,
            "tram" => Self::Tram,
            "suburban" => Self::Suburban,
            _ => Self::Other,
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bus => "Bus",
            Self::Subway => "U-Bahn",
            Self::Tram => "Tram",
            Self::Suburban => "S-Bahn",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The line a departure runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Display name, e.g. "U2", "S5", "M10".
    pub name: String,
    pub product: ProductCategory,
}

impl Line {
    pub fn new(name: impl Into<String>, product: ProductCategory) -> Self {
        Self {
            name: name.into(),
            product,
        }
    }
}

/// One scheduled departure with live delay and cancellation data.
///
/// Every field except `cancelled` may be missing in the source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub line: Option<Line>,
    pub direction: Option<String>,
    pub scheduled_time: Option<DateTime<FixedOffset>>,
    /// Live delay in seconds (negative when early).
    pub delay_seconds: Option<i64>,
    pub cancelled: bool,
}

impl Departure {
    /// Create a departure on the given line with no realtime data.
    pub fn new(line: Line) -> Self {
        Self {
            line: Some(line),
            direction: None,
            scheduled_time: None,
            delay_seconds: None,
            cancelled: false,
        }
    }

    /// Set the delay in seconds.
    pub fn with_delay(mut self, seconds: i64) -> Self {
        self.delay_seconds = Some(seconds);
        self
    }

    /// Mark the departure as cancelled.
    pub fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Product category, `Other` when the line is unknown.
    pub fn category(&self) -> ProductCategory {
        self.line
            .as_ref()
            .map_or(ProductCategory::Other, |l| l.product)
    }

    /// Whether this departure is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether this departure counts as delayed.
    ///
    /// Strictly greater than the threshold; a cancelled departure is never
    /// delayed, and a missing delay never counts.
    pub fn is_delayed(&self, threshold_secs: i64) -> bool {
        !self.cancelled && self.delay_seconds.is_some_and(|d| d > threshold_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u2() -> Line {
        Line::new("U2", ProductCategory::Subway)
    }

    #[test]
    fn product_mapping() {
        assert_eq!(ProductCategory::from_product("bus"), ProductCategory::Bus);
        assert_eq!(
            ProductCategory::from_product("subway"),
            ProductCategory::Subway
        );
        assert_eq!(ProductCategory::from_product("tram"), ProductCategory::Tram);
        assert_eq!(
            ProductCategory::from_product("suburban"),
            ProductCategory::Suburban
        );
        assert_eq!(
            ProductCategory::from_product("regional"),
            ProductCategory::Other
        );
        assert_eq!(ProductCategory::from_product(""), ProductCategory::Other);
    }

    #[test]
    fn delay_is_strict() {
        assert!(!Departure::new(u2()).with_delay(300).is_delayed(300));
        assert!(Departure::new(u2()).with_delay(301).is_delayed(300));
        assert!(!Departure::new(u2()).with_delay(-60).is_delayed(300));
    }

    #[test]
    fn missing_delay_is_not_delayed() {
        assert!(!Departure::new(u2()).is_delayed(0));
    }

    #[test]
    fn cancellation_takes_priority() {
        let dep = Departure::new(u2()).with_delay(3600).cancelled();
        assert!(dep.is_cancelled());
        assert!(!dep.is_delayed(300));
    }

    #[test]
    fn missing_line_is_other() {
        let mut dep = Departure::new(u2());
        dep.line = None;
        assert_eq!(dep.category(), ProductCategory::Other);
    }
}

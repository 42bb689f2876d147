//! Trade tick representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TickError;

/// A single trade event.
///
/// Ticks are immutable once stored. The timestamp is the feed's trade time in
/// milliseconds since the Unix epoch and is non-decreasing per symbol as
/// delivered; no ordering is implied across symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Lowercase instrument identifier (e.g. `btcusdt`).
    pub symbol: String,
    /// Trade time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Trade price.
    pub price: f64,
    /// Traded quantity.
    pub qty: f64,
}

impl Tick {
    /// Creates a new tick, lowercasing the symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>, timestamp: i64, price: f64, qty: f64) -> Self {
        let mut symbol = symbol.into();
        symbol.make_ascii_lowercase();
        Self {
            symbol,
            timestamp,
            price,
            qty,
        }
    }

    /// Checks the timestamp, price and quantity invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is empty, the timestamp has no UTC
    /// datetime, the price is not a positive finite number, or the quantity
    /// is negative or not finite.
    pub fn validate(&self) -> Result<(), TickError> {
        if self.symbol.is_empty() {
            return Err(TickError::EmptySymbol);
        }
        if self.datetime().is_none() {
            return Err(TickError::InvalidTimestamp(self.timestamp));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(TickError::InvalidPrice(self.price));
        }
        if !self.qty.is_finite() || self.qty < 0.0 {
            return Err(TickError::InvalidQty(self.qty));
        }
        Ok(())
    }

    /// Returns the trade time as a UTC datetime.
    ///
    /// Returns `None` if the timestamp is outside chrono's representable range.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_lowercases_symbol() {
        let tick = Tick::new("BTCUSDT", 0, 100.0, 1.0);
        assert_eq!(tick.symbol, "btcusdt");
    }

    #[test]
    fn test_validate() {
        assert!(Tick::new("btcusdt", 0, 100.0, 0.0).validate().is_ok());
        assert!(matches!(
            Tick::new("btcusdt", 0, 0.0, 1.0).validate(),
            Err(TickError::InvalidPrice(_))
        ));
        assert!(matches!(
            Tick::new("btcusdt", 0, f64::NAN, 1.0).validate(),
            Err(TickError::InvalidPrice(_))
        ));
        assert!(matches!(
            Tick::new("btcusdt", 0, 100.0, -1.0).validate(),
            Err(TickError::InvalidQty(_))
        ));
        assert!(matches!(
            Tick::new("", 0, 100.0, 1.0).validate(),
            Err(TickError::EmptySymbol)
        ));
        assert!(matches!(
            Tick::new("btcusdt", i64::MIN, 100.0, 1.0).validate(),
            Err(TickError::InvalidTimestamp(i64::MIN))
        ));
        assert!(Tick::new("btcusdt", -1, 100.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_datetime() {
        let tick = Tick::new("ethusdt", 1_704_110_400_500, 2300.0, 0.5);
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
            + chrono::TimeDelta::milliseconds(500);
        assert_eq!(tick.datetime(), Some(expected));
    }
}

//! Bar resampling timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bar resampling timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1-second bars.
    #[serde(rename = "1s")]
    Second1,
    /// 1-minute bars.
    #[default]
    #[serde(rename = "1m")]
    Minute1,
    /// 5-minute bars.
    #[serde(rename = "5m")]
    Minute5,
}

impl Timeframe {
    /// Returns the bucket width in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        match self {
            Self::Second1 => 1,
            Self::Minute1 => 60,
            Self::Minute5 => 300,
        }
    }

    /// Returns the bucket width in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.seconds() * 1000
    }

    /// Returns the start of the bucket containing `timestamp_ms`.
    ///
    /// Uses floor division, so timestamps before the epoch still land on the
    /// bucket boundary at or below them. Returns `None` when that boundary is
    /// not representable as an `i64`.
    #[must_use]
    pub const fn bucket_start(&self, timestamp_ms: i64) -> Option<i64> {
        let width = self.milliseconds();
        timestamp_ms.div_euclid(width).checked_mul(width)
    }

    /// Returns the timeframe as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second1 => "1s",
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Second1, Self::Minute1, Self::Minute5]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1s" | "s1" | "second" => Ok(Self::Second1),
            "1m" | "m1" | "minute" => Ok(Self::Minute1),
            "5m" | "m5" => Ok(Self::Minute5),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: 1s, 1m, 5m",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}

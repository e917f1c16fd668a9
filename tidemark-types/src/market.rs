//! Raw provider bars and normalized OHLCV points.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A single provider-native row, before windowing or validation.
///
/// Prices may be missing or NaN; volume may be missing or negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Wall-clock time in the timezone of the enclosing [`RawBars`].
    pub ts: NaiveDateTime,
    /// Opening price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Traded volume.
    pub volume: Option<i64>,
}

/// A time-indexed table of raw rows as returned by an upstream provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBars {
    /// Timezone the row timestamps are expressed in; `None` means UTC.
    pub timezone: Option<Tz>,
    /// Rows in source order (oldest first).
    pub rows: Vec<RawBar>,
}

impl RawBars {
    /// Number of raw rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the provider returned no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A normalized OHLCV point rendered in a reference timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPoint {
    /// Absolute instant of the bar.
    pub ts: DateTime<Utc>,
    /// Timezone the point is presented in.
    pub tz: Tz,
    /// Opening price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Closing price; always present in emitted series.
    pub close: Option<f64>,
    /// Traded volume, zero when unknown.
    pub volume: u64,
}

impl OhlcvPoint {
    /// The instant in the point's presentation timezone.
    #[must_use]
    pub fn local(&self) -> DateTime<Tz> {
        self.ts.with_timezone(&self.tz)
    }

    /// Human-readable timestamp, e.g. `2024-03-05 10:15:00 AEDT`.
    #[must_use]
    pub fn display_timestamp(&self) -> String {
        self.local().format("%Y-%m-%d %H:%M:%S %Z").to_string()
    }

    /// Unambiguous RFC 3339 timestamp carrying the presentation offset.
    #[must_use]
    pub fn raw_timestamp(&self) -> String {
        self.local().to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

//! Deterministic bar fixtures.

mod bars;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tidemark_core::{RawBars, SamplingInterval};

pub use bars::series;

const INDICES: &[(&str, f64, Tz)] = &[
    ("^GSPC", 5500.0, chrono_tz::America::New_York),
    ("^DJI", 40000.0, chrono_tz::America::New_York),
    ("^IXIC", 17000.0, chrono_tz::America::New_York),
    ("^AXJO", 8000.0, chrono_tz::Australia::Sydney),
];

/// Number of bars served per sampling interval.
#[must_use]
pub const fn bars_per_interval(interval: SamplingInterval) -> usize {
    match interval {
        SamplingInterval::I1m => 15,
        SamplingInterval::I5m => 12,
        SamplingInterval::I1h => 24,
        _ => 5,
    }
}

/// Fixture bars for a known index, ending at `end`.
#[must_use]
pub fn by_symbol(symbol: &str, interval: SamplingInterval, end: DateTime<Utc>) -> Option<RawBars> {
    let (_, base, tz) = INDICES.iter().find(|(s, _, _)| *s == symbol)?;
    Some(series(
        end,
        Some(*tz),
        bars_per_interval(interval),
        Duration::minutes(interval.minutes()),
        *base,
    ))
}

/// Symbols the fixture table knows.
pub fn symbols() -> impl Iterator<Item = &'static str> {
    INDICES.iter().map(|(s, _, _)| *s)
}

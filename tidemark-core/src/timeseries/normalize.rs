use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{OhlcvPoint, RawBar, RawBars, WindowPolicy};

/// Turn raw provider bars into a bounded, timezone-correct recent slice.
///
/// Behavior:
/// - Row timestamps are read in `raw.timezone` (UTC when absent). Ambiguous
///   wall times take the earliest instant; nonexistent ones fall back to the
///   UTC reading of the wall clock.
/// - Recency window: the last `policy.daily_window_days` calendar days when
///   `is_daily`, otherwise the last `max_hours` hours before `now`. A window
///   that reaches past the earliest representable instant covers every row.
/// - An empty window widens to the last `policy.fallback_tail_rows` raw rows.
/// - Rows with a missing or NaN close are dropped after windowing; NaN
///   open/high/low become `None` and absent or non-positive volume becomes 0.
/// - Points keep source order and are rendered in `tz`.
///
/// An empty return value means the input had no usable rows.
#[must_use]
pub fn normalize(
    raw: &RawBars,
    max_hours: u32,
    is_daily: bool,
    tz: Tz,
    now: DateTime<Utc>,
    policy: &WindowPolicy,
) -> Vec<OhlcvPoint> {
    if raw.is_empty() {
        return vec![];
    }

    let stamped: Vec<(DateTime<Utc>, &RawBar)> = raw
        .rows
        .iter()
        .map(|row| (to_instant(row.ts, raw.timezone), row))
        .collect();

    let span = if is_daily {
        Duration::days(i64::from(policy.daily_window_days))
    } else {
        Duration::hours(i64::from(max_hours))
    };
    // A window reaching past the representable range keeps every row.
    let cutoff = now.with_timezone(&tz).checked_sub_signed(span);

    let mut window: Vec<(DateTime<Utc>, &RawBar)> = stamped
        .iter()
        .filter(|(ts, _)| cutoff.is_none_or(|c| ts.with_timezone(&tz) >= c))
        .copied()
        .collect();

    if window.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = stamped.len(),
            tail = policy.fallback_tail_rows,
            "no rows inside recency window; widening to tail"
        );
        let skip = stamped.len().saturating_sub(policy.fallback_tail_rows);
        window = stamped[skip..].to_vec();
    }

    window
        .into_iter()
        .filter_map(|(ts, row)| {
            let close = finite(row.close)?;
            Some(OhlcvPoint {
                ts,
                tz,
                open: finite(row.open),
                high: finite(row.high),
                low: finite(row.low),
                close: Some(close),
                volume: row
                    .volume
                    .and_then(|v| u64::try_from(v).ok())
                    .unwrap_or(0),
            })
        })
        .collect()
}

fn to_instant(wall: NaiveDateTime, source: Option<Tz>) -> DateTime<Utc> {
    match source {
        Some(zone) => zone
            .from_local_datetime(&wall)
            .earliest()
            .map_or_else(|| wall.and_utc(), |dt| dt.with_timezone(&Utc)),
        None => wall.and_utc(),
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tidemark_core::{RawBar, RawBars};

const WAVE: [f64; 8] = [0.0, 1.0, 2.0, 1.0, 0.0, -1.0, -2.0, -1.0];

/// Build `count` evenly spaced bars ending exactly at `end`.
///
/// Prices oscillate gently around `base` so every bar is valid; each bar opens
/// at the previous close. Wall times are written in `tz` (UTC when `None`).
#[must_use]
pub fn series(end: DateTime<Utc>, tz: Option<Tz>, count: usize, step: Duration, base: f64) -> RawBars {
    let mut rows = Vec::with_capacity(count);
    let mut prev_close = base;
    for k in 0..count {
        let back = i32::try_from(count - 1 - k).unwrap_or(i32::MAX);
        let instant = end - step * back;
        let ts = match tz {
            Some(zone) => instant.with_timezone(&zone).naive_local(),
            None => instant.naive_utc(),
        };
        let close = base * 0.0005f64.mul_add(WAVE[k % WAVE.len()], 1.0);
        let open = prev_close;
        rows.push(RawBar {
            ts,
            open: Some(open),
            high: Some(open.max(close) * 1.0005),
            low: Some(open.min(close) * 0.9995),
            close: Some(close),
            volume: Some(1_000_000 + 1_000 * i64::try_from(k).unwrap_or(0)),
        });
        prev_close = close;
    }
    RawBars { timezone: tz, rows }
}

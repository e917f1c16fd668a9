use crate::OhlcvPoint;

/// Damp a proxy series' intra-bar moves by `correlation`.
///
/// For every point with a non-zero `open` and a `close`, the open-to-close
/// return is scaled by `correlation` and the close is rebuilt from the open.
/// High and low are re-banded around the rebuilt body by
/// `band_factor * |adjusted return|`. Timestamps and volume are untouched.
///
/// A coefficient of exactly `1.0` returns the input unchanged, as do points
/// without an open.
#[must_use]
pub fn adjust(series: Vec<OhlcvPoint>, correlation: f64, band_factor: f64) -> Vec<OhlcvPoint> {
    if correlation == 1.0 {
        return series;
    }
    series
        .into_iter()
        .map(|p| adjust_point(p, correlation, band_factor))
        .collect()
}

fn adjust_point(mut p: OhlcvPoint, correlation: f64, band_factor: f64) -> OhlcvPoint {
    let (Some(open), Some(close)) = (p.open, p.close) else {
        return p;
    };
    if open == 0.0 {
        return p;
    }
    let adjusted = (close - open) / open * correlation;
    let new_close = open * (1.0 + adjusted);
    let band = band_factor * adjusted.abs();
    p.close = Some(new_close);
    p.high = Some(open.max(new_close) * (1.0 + band));
    p.low = Some(open.min(new_close) * (1.0 - band));
    p
}

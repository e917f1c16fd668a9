//! Synthetic OHLCV generators used when no real series is reachable.
//!
//! Both generators draw from a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces the same series.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{OhlcvPoint, SymbolProfile, SyntheticConfig};

/// Walk that follows a reference series' realized close-to-close returns.
///
/// Each step's return is `reference_return * profile.correlation` plus
/// Gaussian noise (`cfg.noise_std`). The walk starts at the profile's
/// `base_price` (or `cfg.seed_price`) and copies timestamps and timezone from
/// `reference`. Reference points without a close are skipped.
///
/// Returns an empty series when `reference` has no closes.
pub fn correlated_walk<R>(
    reference: &[OhlcvPoint],
    profile: &SymbolProfile,
    cfg: &SyntheticConfig,
    rng: &mut R,
) -> Vec<OhlcvPoint>
where
    R: Rng + ?Sized,
{
    let seed = seed_price(profile, cfg);
    let mut out: Vec<OhlcvPoint> = Vec::with_capacity(reference.len());
    let mut prev_ref: Option<f64> = None;
    let mut prev_close = seed;

    for p in reference {
        let Some(ref_close) = p.close else { continue };
        let point = match prev_ref {
            None => OhlcvPoint {
                ts: p.ts,
                tz: p.tz,
                open: Some(seed),
                high: Some(seed * (1.0 + cfg.volatility_floor)),
                low: Some(seed * (1.0 - cfg.volatility_floor)),
                close: Some(seed),
                volume: volume(cfg, rng),
            },
            Some(prev) => {
                let ref_ret = if prev == 0.0 {
                    0.0
                } else {
                    (ref_close - prev) / prev
                };
                let ret = ref_ret * profile.correlation + gaussian(rng, 0.0, cfg.noise_std);
                let close = prev_close * (1.0 + ret);
                let vol = ret.abs() * cfg.volatility_scale + cfg.volatility_floor;
                OhlcvPoint {
                    ts: p.ts,
                    tz: p.tz,
                    open: Some(prev_close),
                    high: Some(close * (1.0 + vol)),
                    low: Some(close * (1.0 - vol)),
                    close: Some(close),
                    volume: volume(cfg, rng),
                }
            }
        };
        prev_ref = Some(ref_close);
        prev_close = point.close.unwrap_or(prev_close);
        out.push(point);
    }
    out
}

/// Standalone hourly random walk of `cfg.walk_points` points ending at `now`.
///
/// Step returns are `N(0, cfg.walk_step_std)`; high and low sit a fixed
/// `cfg.walk_band` outside the candle body.
pub fn random_walk<R>(
    profile: &SymbolProfile,
    cfg: &SyntheticConfig,
    now: DateTime<Utc>,
    tz: Tz,
    rng: &mut R,
) -> Vec<OhlcvPoint>
where
    R: Rng + ?Sized,
{
    let n = cfg.walk_points;
    let mut price = seed_price(profile, cfg);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let hours_back = i64::try_from(n - 1 - i).unwrap_or(i64::MAX);
        let ts = now - Duration::hours(hours_back);
        let open = price;
        let close = open * (1.0 + gaussian(rng, 0.0, cfg.walk_step_std));
        out.push(OhlcvPoint {
            ts,
            tz,
            open: Some(open),
            high: Some(open.max(close) * (1.0 + cfg.walk_band)),
            low: Some(open.min(close) * (1.0 - cfg.walk_band)),
            close: Some(close),
            volume: volume(cfg, rng),
        });
        price = close;
    }
    out
}

fn seed_price(profile: &SymbolProfile, cfg: &SyntheticConfig) -> f64 {
    profile
        .base_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(cfg.seed_price)
}

// Invalid parameters (negative or non-finite std) degrade to the mean.
fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    Normal::new(mean, std).map_or(mean, |n| n.sample(rng))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn volume<R: Rng + ?Sized>(cfg: &SyntheticConfig, rng: &mut R) -> u64 {
    gaussian(rng, cfg.volume_mean, cfg.volume_std).max(0.0).round() as u64
}

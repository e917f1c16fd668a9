//! Configuration types shared across the orchestrator and connectors.

use std::fmt;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Lookback period requested from an upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Period {
    /// Two calendar days.
    D2,
    /// Five calendar days.
    D5,
    /// One month.
    M1,
}

impl Period {
    /// Approximate length of the period in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::D2 => 2,
            Self::D5 => 5,
            Self::M1 => 30,
        }
    }

    /// Short provider-style code (`2d`, `5d`, `1mo`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::D2 => "2d",
            Self::D5 => "5d",
            Self::M1 => "1mo",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Sampling interval between consecutive bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SamplingInterval {
    /// One minute.
    I1m,
    /// Five minutes.
    I5m,
    /// One hour.
    I1h,
    /// One trading day.
    D1,
}

impl SamplingInterval {
    /// Interval length in minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        match self {
            Self::I1m => 1,
            Self::I5m => 5,
            Self::I1h => 60,
            Self::D1 => 1440,
        }
    }

    /// Short provider-style code (`1m`, `5m`, `1h`, `1d`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::I1m => "1m",
            Self::I5m => "5m",
            Self::I1h => "1h",
            Self::D1 => "1d",
        }
    }
}

impl fmt::Display for SamplingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One rung of the fetch ladder.
///
/// Rungs are consumed top-to-bottom; earlier rungs trade completeness for
/// finer, more recent sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchCandidate {
    /// Lookback period requested from the provider.
    pub period: Period,
    /// Sampling interval requested from the provider.
    pub interval: SamplingInterval,
    /// Human-readable label used in attempt records and logs.
    pub description: String,
    /// Minimum number of normalized points required to accept the rung.
    pub min_points: usize,
    /// Factor applied to the caller's `max_hours` before windowing.
    pub window_multiplier: u32,
    /// Use the calendar-day window instead of the hour window.
    pub is_daily: bool,
}

impl FetchCandidate {
    /// Build an intraday rung.
    pub fn intraday(
        period: Period,
        interval: SamplingInterval,
        min_points: usize,
        window_multiplier: u32,
    ) -> Self {
        Self {
            period,
            interval,
            description: format!("{period} period, {interval} interval"),
            min_points,
            window_multiplier,
            is_daily: false,
        }
    }

    /// Build a daily rung using the calendar-day window.
    pub fn daily(period: Period, window_multiplier: u32) -> Self {
        Self {
            period,
            interval: SamplingInterval::D1,
            description: format!("{period} period, 1d interval"),
            min_points: 1,
            window_multiplier,
            is_daily: true,
        }
    }

    /// Effective window in hours for a caller-supplied `max_hours`.
    #[must_use]
    pub const fn window_hours(&self, max_hours: u32) -> u32 {
        max_hours.saturating_mul(self.window_multiplier)
    }
}

/// The default four-rung ladder: 2d/1m, 5d/5m, 1mo/1h, 5d/1d.
#[must_use]
pub fn default_ladder() -> Vec<FetchCandidate> {
    vec![
        FetchCandidate::intraday(Period::D2, SamplingInterval::I1m, 11, 1),
        FetchCandidate::intraday(Period::D5, SamplingInterval::I5m, 6, 1),
        // Coarser sampling: double the window so it is never tighter than one bar.
        FetchCandidate::intraday(Period::M1, SamplingInterval::I1h, 1, 2),
        FetchCandidate::daily(Period::D5, 24),
    ]
}

/// Recency window applied by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPolicy {
    /// Calendar days kept for daily sampling.
    pub daily_window_days: u32,
    /// Raw rows kept when the window leaves nothing.
    pub fallback_tail_rows: usize,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            daily_window_days: 5,
            fallback_tail_rows: 100,
        }
    }
}

/// Heuristic constants for synthetic series.
///
/// These are not fitted to any market; they only have to produce a plausible,
/// clearly tagged stand-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Starting price when the profile has no `base_price`.
    pub seed_price: f64,
    /// Standard deviation of the independent noise added to correlated returns.
    pub noise_std: f64,
    /// Multiplier applied to the absolute move when sizing the high/low band.
    pub volatility_scale: f64,
    /// Minimum high/low band as a fraction of close.
    pub volatility_floor: f64,
    /// Number of points in the standalone random walk.
    pub walk_points: usize,
    /// Standard deviation of standalone random-walk step returns.
    pub walk_step_std: f64,
    /// Fixed high/low band of the standalone random walk.
    pub walk_band: f64,
    /// Mean of synthetic volumes.
    pub volume_mean: f64,
    /// Standard deviation of synthetic volumes.
    pub volume_std: f64,
    /// Benchmarks tried, in order, as the correlated-walk reference.
    pub reference_symbols: Vec<String>,
    /// Recency window for the reference fetch.
    pub reference_window_hours: u32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed_price: 1000.0,
            noise_std: 0.001,
            volatility_scale: 0.5,
            volatility_floor: 0.001,
            walk_points: 24,
            walk_step_std: 0.005,
            walk_band: 0.003,
            volume_mean: 2_500_000.0,
            volume_std: 750_000.0,
            reference_symbols: vec!["^GSPC".into(), "^DJI".into(), "^IXIC".into()],
            reference_window_hours: 24,
        }
    }
}

/// Global configuration for the `Tidemark` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidemarkConfig {
    /// Timezone all series are rendered and windowed in.
    pub reference_tz: Tz,
    /// Fetch ladder rungs, tried in order for every candidate symbol.
    pub ladder: Vec<FetchCandidate>,
    /// Normalizer window policy.
    pub window: WindowPolicy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for a single resolution.
    /// Once elapsed, remaining real-data stages are skipped.
    pub request_timeout: Option<Duration>,
    /// High/low band factor used by the correlation adjuster.
    pub band_factor: f64,
    /// Synthetic series constants.
    pub synthetic: SyntheticConfig,
    /// Maximum concurrent resolutions in a bulk request.
    pub bulk_concurrency: usize,
    /// Symbols resolved by the status probe.
    pub probe_symbols: Vec<String>,
    /// Window used by the status probe.
    pub probe_max_hours: u32,
}

impl Default for TidemarkConfig {
    fn default() -> Self {
        Self {
            reference_tz: chrono_tz::Australia::Sydney,
            ladder: default_ladder(),
            window: WindowPolicy::default(),
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
            band_factor: 0.5,
            synthetic: SyntheticConfig::default(),
            bulk_concurrency: 4,
            probe_symbols: vec!["^AXJO".into(), "^GSPC".into(), "^DJI".into()],
            probe_max_hours: 24,
        }
    }
}

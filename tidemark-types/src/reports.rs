//! Report envelopes produced by the orchestrator.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::attempts::AttemptRecord;
use crate::error::TidemarkError;
use crate::market::OhlcvPoint;

/// Where the returned series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The canonical symbol itself.
    Primary,
    /// An alias of the canonical symbol.
    Alias,
    /// A correlation-adjusted proxy instrument.
    Proxy,
    /// Generated data; not market data.
    Synthetic,
}

impl SourceKind {
    /// True for anything backed by real upstream data.
    #[must_use]
    pub const fn is_real(self) -> bool {
        !matches!(self, Self::Synthetic)
    }
}

/// How a synthetic series was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SyntheticOrigin {
    /// Walk correlated against a benchmark's realized returns.
    Correlated {
        /// Benchmark symbol the returns were taken from.
        reference: String,
    },
    /// Standalone hourly random walk.
    RandomWalk,
}

/// Result of resolving one symbol.
///
/// Always carries a series; `source_kind`, `warnings` and `attempts` tell the
/// caller how far down the fallback ladder the engine had to go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Canonical symbol after input normalization.
    pub requested_symbol: String,
    /// Catalog display name (the symbol itself when unknown).
    pub display_name: String,
    /// Close-valid points, oldest first.
    pub series: Vec<OhlcvPoint>,
    /// Origin class of `series`.
    pub source_kind: SourceKind,
    /// Symbol whose data (or, for synthetic results, whose profile) produced `series`.
    pub source_symbol: String,
    /// Human-readable degradation notes; empty for primary results.
    pub warnings: Vec<String>,
    /// Ordered attempt log.
    pub attempts: AttemptRecord,
    /// Present only for synthetic results.
    pub synthetic: Option<SyntheticOrigin>,
    /// Timezone the series is rendered in.
    pub timezone: Tz,
    /// When the resolution completed.
    pub resolved_at: DateTime<Utc>,
}

impl ResolutionResult {
    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// True when the series is backed by upstream data.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        self.source_kind.is_real()
    }
}

/// Summary of a bulk resolution.
///
/// Every well-formed requested symbol has an entry in `results`; ill-formed
/// ones are reported in `warnings` without aborting the batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulkReport {
    /// Per-symbol results keyed by the requested symbol (after normalization).
    pub results: HashMap<String, ResolutionResult>,
    /// Number of symbols in the request, duplicates included.
    pub total_symbols: usize,
    /// Results backed by upstream data (primary, alias or proxy).
    pub successful_symbols: usize,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TidemarkError>,
}

/// Health classification of a probed symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Primary data available.
    Live,
    /// Served from an alias or proxy.
    Degraded,
    /// Nothing real was reachable.
    Synthetic,
}

impl From<SourceKind> for ProbeStatus {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Primary => Self::Live,
            SourceKind::Alias | SourceKind::Proxy => Self::Degraded,
            SourceKind::Synthetic => Self::Synthetic,
        }
    }
}

/// One probed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeEntry {
    /// Probed symbol.
    pub symbol: String,
    /// Health classification.
    pub status: ProbeStatus,
    /// Points returned.
    pub data_points: usize,
}

/// Snapshot of upstream health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// When the probe ran.
    pub checked_at: DateTime<Utc>,
    /// Per-symbol results in probe order.
    pub entries: Vec<ProbeEntry>,
    /// Number of profiles in the catalog.
    pub catalog_size: usize,
}

impl StatusReport {
    /// True when at least one probed symbol returned live data.
    #[must_use]
    pub fn any_live(&self) -> bool {
        self.entries.iter().any(|e| e.status == ProbeStatus::Live)
    }
}

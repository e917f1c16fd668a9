//! Tidemark resolves a request for recent price history into a usable OHLCV series,
//! even when the authoritative upstream source is down, rate-limited or lacks the symbol.
//!
//! Overview
//! - Routes bar requests to connectors that implement the `tidemark_core` contracts.
//! - Walks a fetch ladder per symbol, from fine recent sampling to coarse daily bars.
//! - Falls back from the canonical symbol to its aliases, then to correlated proxies,
//!   and finally to a clearly tagged synthetic series.
//! - Normalizes every series into a bounded recency window in a reference timezone.
//!
//! Key behaviors and trade-offs
//! - Resolution never fails for well-formed input; degradation is reported through
//!   `source_kind`, warnings and the attempt log rather than errors.
//! - Proxy series are damped by the profile's correlation coefficient; this is a
//!   heuristic, not a model of the proxied instrument.
//! - Synthetic series are plausible stand-ins only. Seed the generator with
//!   `TidemarkBuilder::rng_seed` to make them reproducible.
//! - Every provider call is bounded by `provider_timeout`; an optional request deadline
//!   bounds the whole resolution.
//!
//! Examples
//! Building an orchestrator and resolving one symbol:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tidemark::Tidemark;
//! use tidemark_yfinance::YfConnector;
//!
//! let tm = Tidemark::builder()
//!     .with_connector(Arc::new(YfConnector::try_new_default()?))
//!     .reference_tz(chrono_tz::Australia::Sydney)
//!     .build()?;
//!
//! let res = tm.resolve("%5EAXKO", 24).await?;
//! for w in &res.warnings {
//!     eprintln!("{w}");
//! }
//! ```
//!
//! Bulk resolution:
//! ```rust,ignore
//! let report = tm.bulk().symbols(["^GSPC", "^AXJO", "ZZZZ"]).max_hours(12).run().await?;
//! println!("{}/{} live", report.successful_symbols, report.total_symbols);
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Tidemark, TidemarkBuilder};
pub use router::bulk::BulkBuilder;
pub use router::ladder::LadderHit;
pub use router::util::collapse_errors;

pub use tidemark_core::{
    AttemptEntry, AttemptRecord, BarsProvider, BulkReport, Clock, FetchCandidate, FixedClock,
    OhlcvPoint, Outcome, Period, ProbeEntry, ProbeStatus, RawBar, RawBars, ResolutionResult,
    SamplingInterval, SourceKind, Stage, StatusReport, SymbolCatalog, SymbolProfile,
    SyntheticConfig, SyntheticOrigin, SystemClock, TidemarkConfig, TidemarkConnector,
    TidemarkError, WindowPolicy, default_ladder,
};

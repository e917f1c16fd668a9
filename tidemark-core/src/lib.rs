//! tidemark-core
//!
//! Traits, the symbol catalog and time-series utilities shared across the
//! tidemark workspace.
//!
//! - `connector`: the `TidemarkConnector` trait and the `BarsProvider` role trait.
//! - `catalog`: the immutable `SymbolCatalog` and input symbol normalization.
//! - `clock`: injectable "now" for recency windows.
//! - `timeseries`: normalizer, correlation adjuster and synthetic generators.
//!
//! Everything in `timeseries` is synchronous and pure apart from the injected
//! random generator; async I/O lives in connectors and the orchestrator.
#![warn(missing_docs)]

/// Immutable symbol catalog and input symbol normalization.
pub mod catalog;
/// Injectable time source.
pub mod clock;
/// Connector capability traits and the primary `TidemarkConnector` interface.
pub mod connector;
/// Time-series utilities for normalizing, adjusting and generating OHLCV series.
pub mod timeseries;

pub use catalog::{SymbolCatalog, normalize_symbol};
pub use clock::{Clock, FixedClock, SystemClock};
pub use connector::{BarsProvider, TidemarkConnector};
pub use timeseries::adjust::adjust;
pub use timeseries::normalize::normalize;
pub use timeseries::synthetic::{correlated_walk, random_walk};
pub use tidemark_types::*;

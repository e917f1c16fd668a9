//! Time-series utilities shared by connectors and orchestrator.
//!
//! Modules include:
//! - `normalize`: window, timezone-convert and clean raw provider bars
//! - `adjust`: damp a proxy series by a correlation coefficient
//! - `synthetic`: correlated and standalone random walks
/// Correlation adjustment of proxy series.
pub mod adjust;
/// Raw bar normalization into recent, close-valid points.
pub mod normalize;
/// Synthetic series generators.
pub mod synthetic;

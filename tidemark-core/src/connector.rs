use async_trait::async_trait;

use crate::{Period, RawBars, SamplingInterval, TidemarkError};

/// Focused role trait for connectors that serve row-level price bars.
#[async_trait]
pub trait BarsProvider: Send + Sync {
    /// Fetch raw bars for `symbol` covering `period` at `interval` sampling.
    ///
    /// Any failure (network, rate limit, unknown symbol) is returned as an
    /// error; the fetch ladder treats all of them as an ordinary rung failure.
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: SamplingInterval,
    ) -> Result<RawBars, TidemarkError>;
}

/// Main connector trait implemented by upstream data providers.
///
/// Capabilities are advertised through `as_*_provider` accessors so the
/// orchestrator can skip connectors that cannot serve a request.
pub trait TidemarkConnector: Send + Sync {
    /// A stable identifier used in attempt records and error tags
    /// (e.g. "tidemark-yfinance").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise bars capability by returning a usable trait object reference when supported.
    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        None
    }
}

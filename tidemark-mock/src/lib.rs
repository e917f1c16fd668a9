use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tidemark_core::connector::{BarsProvider, TidemarkConnector};
use tidemark_core::{Period, RawBars, SamplingInterval, TidemarkError};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

/// Mock connector for CI-safe demos. Serves deterministic bars for a handful of indices.
///
/// Special symbols:
/// - `FAIL` returns a connector error.
/// - `TIMEOUT` sleeps briefly before answering, so a short provider timeout trips.
pub struct MockConnector {
    anchor: DateTime<Utc>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Fixtures anchored at 2024-03-05 04:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        Self::anchored(Self::default_anchor())
    }

    /// Fixtures whose last bar lands exactly on `anchor`.
    #[must_use]
    pub const fn anchored(anchor: DateTime<Utc>) -> Self {
        Self { anchor }
    }

    /// The instant default fixtures end at.
    #[must_use]
    pub fn default_anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 4, 0, 0)
            .single()
            .unwrap_or_default()
    }

    async fn maybe_fail_or_timeout(symbol: &str) -> Result<(), TidemarkError> {
        match symbol {
            "FAIL" => Err(TidemarkError::connector(
                "tidemark-mock",
                "forced failure: bars",
            )),
            "TIMEOUT" => {
                // Long enough to trip a short provider timeout in tests.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl TidemarkConnector for MockConnector {
    fn name(&self) -> &'static str {
        "tidemark-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        Some(self as &dyn BarsProvider)
    }
}

#[async_trait]
impl BarsProvider for MockConnector {
    async fn fetch_bars(
        &self,
        symbol: &str,
        _period: Period,
        interval: SamplingInterval,
    ) -> Result<RawBars, TidemarkError> {
        Self::maybe_fail_or_timeout(symbol).await?;
        fixtures::by_symbol(symbol, interval, self.anchor)
            .ok_or_else(|| TidemarkError::not_found(format!("bars for {symbol}")))
    }
}

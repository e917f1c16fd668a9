use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tidemark_core::{BulkReport, TidemarkError, normalize_symbol};

use crate::Tidemark;

/// Default window for bulk requests when `max_hours` is not set.
const DEFAULT_MAX_HOURS: u32 = 24;

/// Builder to resolve many symbols concurrently.
pub struct BulkBuilder<'a> {
    pub(crate) tidemark: &'a Tidemark,
    pub(crate) symbols: Vec<String>,
    pub(crate) max_hours: u32,
}

impl<'a> BulkBuilder<'a> {
    /// Create a new builder bound to a `Tidemark` instance.
    ///
    /// Behavior:
    /// - Starts with an empty symbol list and a 24-hour window.
    #[must_use]
    pub const fn new(tidemark: &'a Tidemark) -> Self {
        Self {
            tidemark,
            symbols: Vec::new(),
            max_hours: DEFAULT_MAX_HOURS,
        }
    }

    /// Replace the symbol list.
    #[must_use]
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Append one symbol.
    #[must_use]
    pub fn add_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    /// Recency window applied to every symbol.
    #[must_use]
    pub const fn max_hours(mut self, hours: u32) -> Self {
        self.max_hours = hours;
        self
    }

    /// Resolve every symbol and aggregate the results.
    ///
    /// Behavior:
    /// - Symbols are normalized first; duplicates after normalization are resolved once.
    /// - At most `bulk_concurrency` resolutions run at a time.
    /// - Ill-formed symbols are reported in `warnings` without aborting the batch.
    /// - `successful_symbols` counts results backed by real upstream data.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no symbols are specified or `max_hours` is zero.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark::bulk::run",
            skip(self),
            fields(symbols = self.symbols.len(), max_hours = self.max_hours),
        )
    )]
    pub async fn run(self) -> Result<BulkReport, TidemarkError> {
        if self.symbols.is_empty() {
            return Err(TidemarkError::InvalidArg(
                "no symbols specified for bulk resolution".into(),
            ));
        }
        if self.max_hours == 0 {
            return Err(TidemarkError::InvalidArg(
                "max_hours must be at least 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        let unique: Vec<String> = self
            .symbols
            .iter()
            .map(|s| normalize_symbol(s))
            .filter(|s| seen.insert(s.clone()))
            .collect();

        let tidemark = self.tidemark;
        let max_hours = self.max_hours;
        let outcomes: Vec<_> = stream::iter(unique)
            .map(|symbol| async move {
                let res = tidemark.resolve(&symbol, max_hours).await;
                (symbol, res)
            })
            .buffered(tidemark.cfg.bulk_concurrency)
            .collect()
            .await;

        let mut report = BulkReport {
            total_symbols: self.symbols.len(),
            ..BulkReport::default()
        };
        for (symbol, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    if result.is_real() {
                        report.successful_symbols += 1;
                    }
                    report.results.insert(symbol, result);
                }
                Err(e) => report.warnings.push(e),
            }
        }
        #[cfg(feature = "tracing")]
        tracing::info!(
            resolved = report.results.len(),
            successful = report.successful_symbols,
            warnings = report.warnings.len(),
            "bulk resolution finished"
        );
        Ok(report)
    }
}

impl Tidemark {
    /// Start a bulk resolution.
    ///
    /// ```rust,ignore
    /// let report = tm.bulk().symbols(["^GSPC", "^AXJO"]).max_hours(12).run().await?;
    /// ```
    #[must_use]
    pub const fn bulk(&self) -> BulkBuilder<'_> {
        BulkBuilder::new(self)
    }

    /// Resolve many symbols with a shared window.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `symbols` is empty or `max_hours` is zero.
    pub async fn resolve_many<S: AsRef<str>>(
        &self,
        symbols: &[S],
        max_hours: u32,
    ) -> Result<BulkReport, TidemarkError> {
        self.bulk()
            .symbols(symbols.iter().map(|s| s.as_ref().to_string()))
            .max_hours(max_hours)
            .run()
            .await
    }
}

use tidemark_core::{ProbeEntry, StatusReport, TidemarkError};

use crate::Tidemark;

impl Tidemark {
    /// Resolve the configured probe symbols and report upstream health.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no probe symbols are configured or one of them is blank.
    pub async fn status(&self) -> Result<StatusReport, TidemarkError> {
        self.probe(self.cfg.probe_symbols.as_slice()).await
    }

    /// Resolve each symbol over `probe_max_hours` and classify the outcome.
    ///
    /// Symbols are probed one after another and reported in input order.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `symbols` is empty, or if any symbol is blank
    /// after normalization.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tidemark::status::probe", skip_all, fields(symbols = symbols.len())),
    )]
    pub async fn probe<S: AsRef<str>>(&self, symbols: &[S]) -> Result<StatusReport, TidemarkError> {
        if symbols.is_empty() {
            return Err(TidemarkError::InvalidArg("no probe symbols specified".into()));
        }
        let mut entries = Vec::with_capacity(symbols.len());
        for s in symbols {
            let symbol = s.as_ref();
            let res = self.resolve(symbol, self.cfg.probe_max_hours).await?;
            entries.push(ProbeEntry {
                symbol: res.requested_symbol,
                status: res.source_kind.into(),
                data_points: res.series.len(),
            });
        }
        Ok(StatusReport {
            checked_at: self.clock.now(),
            entries,
            catalog_size: self.catalog.len(),
        })
    }
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tidemark_core::{
    Clock, FetchCandidate, SymbolCatalog, SyntheticConfig, SystemClock, TidemarkConfig,
    TidemarkConnector, TidemarkError, WindowPolicy,
};
use tokio::time::Instant;

/// Orchestrator that resolves symbols into usable recent-history series.
///
/// Holds only shared, read-only state; every resolution is independent.
pub struct Tidemark {
    pub(crate) connectors: Vec<Arc<dyn TidemarkConnector>>,
    pub(crate) catalog: Arc<SymbolCatalog>,
    pub(crate) cfg: TidemarkConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rng_seed: Option<u64>,
}

/// Builder for constructing a `Tidemark` orchestrator with custom configuration.
pub struct TidemarkBuilder {
    connectors: Vec<Arc<dyn TidemarkConnector>>,
    catalog: Arc<SymbolCatalog>,
    cfg: TidemarkConfig,
    clock: Arc<dyn Clock>,
    rng_seed: Option<u64>,
}

impl Default for TidemarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TidemarkBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior:
    /// - Starts with no connectors; register at least one via [`Self::with_connector`].
    /// - Uses the builtin catalog, the default four-rung ladder, a 5s provider
    ///   timeout, no request deadline and the system clock.
    /// - Synthetic series draw from OS entropy unless [`Self::rng_seed`] is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            catalog: Arc::new(SymbolCatalog::builtin()),
            cfg: TidemarkConfig::default(),
            clock: Arc::new(SystemClock),
            rng_seed: None,
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is priority order: each ladder rung is tried against
    /// connectors in the order they were added.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TidemarkConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the symbol catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: impl Into<Arc<SymbolCatalog>>) -> Self {
        self.catalog = catalog.into();
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TidemarkConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Timezone series are windowed and rendered in (default `Australia/Sydney`).
    #[must_use]
    pub const fn reference_tz(mut self, tz: Tz) -> Self {
        self.cfg.reference_tz = tz;
        self
    }

    /// Replace the fetch ladder.
    #[must_use]
    pub fn ladder(mut self, ladder: Vec<FetchCandidate>) -> Self {
        self.cfg.ladder = ladder;
        self
    }

    /// Normalizer window policy (daily window and fallback tail length).
    #[must_use]
    pub const fn window_policy(mut self, policy: WindowPolicy) -> Self {
        self.cfg.window = policy;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for a single resolution.
    ///
    /// Behavior:
    /// - Bounds total latency even when many candidates time out sequentially.
    /// - Once elapsed, remaining real-data attempts are recorded as skipped and the
    ///   result falls through to the standalone random walk.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// High/low band factor used when adjusting proxy series (default 0.5).
    #[must_use]
    pub const fn band_factor(mut self, factor: f64) -> Self {
        self.cfg.band_factor = factor;
        self
    }

    /// Synthetic series constants.
    #[must_use]
    pub fn synthetic(mut self, cfg: SyntheticConfig) -> Self {
        self.cfg.synthetic = cfg;
        self
    }

    /// Maximum number of concurrent resolutions in a bulk request (default 4).
    #[must_use]
    pub const fn bulk_concurrency(mut self, n: usize) -> Self {
        self.cfg.bulk_concurrency = n;
        self
    }

    /// Symbols resolved by [`Tidemark::status`].
    #[must_use]
    pub fn probe_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.probe_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Source of "now" for recency windows and synthetic timestamps.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Make synthetic series reproducible.
    ///
    /// Each resolution derives its generator from this seed and the canonical
    /// symbol, so the same symbol yields the same synthetic series regardless
    /// of bulk scheduling order.
    #[must_use]
    pub const fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Build the `Tidemark` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered, the ladder is empty,
    /// `bulk_concurrency` is zero, or `band_factor` is negative or not finite.
    pub fn build(self) -> Result<Tidemark, TidemarkError> {
        if self.connectors.is_empty() {
            return Err(TidemarkError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.ladder.is_empty() {
            return Err(TidemarkError::InvalidArg(
                "fetch ladder must have at least one rung".to_string(),
            ));
        }
        if self.cfg.bulk_concurrency == 0 {
            return Err(TidemarkError::InvalidArg(
                "bulk_concurrency must be at least 1".to_string(),
            ));
        }
        if !(self.cfg.band_factor.is_finite() && self.cfg.band_factor >= 0.0) {
            return Err(TidemarkError::InvalidArg(format!(
                "band_factor must be a non-negative number, got {}",
                self.cfg.band_factor
            )));
        }

        Ok(Tidemark {
            connectors: self.connectors,
            catalog: self.catalog,
            cfg: self.cfg,
            clock: self.clock,
            rng_seed: self.rng_seed,
        })
    }
}

pub fn tag_err(connector: &str, e: TidemarkError) -> TidemarkError {
    match e {
        e @ (TidemarkError::NotFound { .. }
        | TidemarkError::ProviderTimeout { .. }
        | TidemarkError::Connector { .. }
        | TidemarkError::RequestTimeout { .. }
        | TidemarkError::AllProvidersTimedOut { .. }
        | TidemarkError::InsufficientData { .. }
        | TidemarkError::AllProvidersFailed(_)) => e,
        other => TidemarkError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Tidemark {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark::core::provider_call_with_timeout",
            skip_all,
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, TidemarkError>
    where
        Fut: Future<Output = Result<T, TidemarkError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TidemarkError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Tidemark` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tidemark::Tidemark;
    /// use tidemark_yfinance::YfConnector;
    ///
    /// let yf = Arc::new(YfConnector::try_new_default()?);
    /// let tm = Tidemark::builder()
    ///     .with_connector(yf)
    ///     .provider_timeout(std::time::Duration::from_secs(3))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TidemarkBuilder {
        TidemarkBuilder::new()
    }

    /// The catalog used for profile lookups.
    #[must_use]
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &TidemarkConfig {
        &self.cfg
    }

    /// Per-resolution random generator.
    pub(crate) fn rng_for(&self, symbol: &str) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ fnv1a(symbol)),
            None => StdRng::from_os_rng(),
        }
    }

    /// Absolute deadline for a resolution starting now, if one is configured.
    pub(crate) fn request_deadline(&self) -> Option<Instant> {
        self.cfg.request_timeout.map(|d| Instant::now() + d)
    }

    /// Per-call timeout, clipped to whatever is left of the request deadline.
    pub(crate) fn call_timeout(&self, deadline: Option<Instant>) -> Duration {
        deadline.map_or(self.cfg.provider_timeout, |d| {
            self.cfg
                .provider_timeout
                .min(d.saturating_duration_since(Instant::now()))
        })
    }
}

pub(crate) fn deadline_elapsed(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

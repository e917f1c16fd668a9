use tidemark_core::{
    AttemptRecord, OhlcvPoint, Outcome, ResolutionResult, SourceKind, Stage, SymbolProfile,
    SyntheticOrigin, TidemarkError, adjust, normalize_symbol,
};
use tokio::time::Instant;

use crate::Tidemark;
use crate::core::deadline_elapsed;
use crate::router::ladder::LadderHit;
use crate::router::util::failure_reason;

/// Mutable state carried through one resolution.
pub(crate) struct Resolution {
    pub(crate) profile: SymbolProfile,
    pub(crate) max_hours: u32,
    pub(crate) deadline: Option<Instant>,
    pub(crate) attempts: AttemptRecord,
    pub(crate) warnings: Vec<String>,
}

impl Tidemark {
    /// Resolve a symbol into a recent OHLCV series, degrading as far as needed.
    ///
    /// Behavior:
    /// - The input is percent-decoded and trimmed, then looked up in the catalog;
    ///   unknown symbols get a profile with no aliases or proxies.
    /// - Stages run strictly forward: the canonical symbol, each alias, each proxy
    ///   (adjusted by the profile's correlation), then a synthetic series.
    /// - Every attempt is logged on the result; every degraded result carries a warning.
    /// - Once the request deadline elapses, remaining real-data attempts are skipped and
    ///   a standalone random walk is returned.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is empty after normalization or
    /// `max_hours` is zero. Upstream failures are never surfaced.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark::resolve",
            skip_all,
            fields(symbol = %symbol, max_hours = max_hours),
        )
    )]
    pub async fn resolve(
        &self,
        symbol: &str,
        max_hours: u32,
    ) -> Result<ResolutionResult, TidemarkError> {
        let canonical = normalize_symbol(symbol);
        if canonical.is_empty() {
            return Err(TidemarkError::InvalidArg(
                "symbol must not be empty".to_string(),
            ));
        }
        if max_hours == 0 {
            return Err(TidemarkError::InvalidArg(
                "max_hours must be at least 1".to_string(),
            ));
        }

        let mut run = Resolution {
            profile: self.catalog.profile_for(&canonical),
            max_hours,
            deadline: self.request_deadline(),
            attempts: AttemptRecord::new(),
            warnings: Vec::new(),
        };
        let primary = run.profile.canonical_id.clone();

        if let Some(hit) = self.try_candidate(&mut run, Stage::Primary, &primary).await {
            return Ok(self.finish(run, &canonical, hit.points, SourceKind::Primary, primary, None));
        }

        let aliases: Vec<String> = run.profile.fallback_aliases().map(str::to_string).collect();
        for alias in aliases {
            if let Some(hit) = self.try_candidate(&mut run, Stage::Alias, &alias).await {
                run.warnings.push(format!(
                    "Primary symbol {primary} unavailable; using alias {alias}"
                ));
                #[cfg(feature = "tracing")]
                tracing::info!(alias = %alias, "resolved via alias");
                return Ok(self.finish(run, &canonical, hit.points, SourceKind::Alias, alias, None));
            }
        }

        let proxies = run.profile.proxy_ids.clone();
        for proxy in proxies {
            if let Some(hit) = self.try_candidate(&mut run, Stage::Proxy, &proxy).await {
                let correlation = run.profile.correlation;
                let series = adjust(hit.points, correlation, self.cfg.band_factor);
                run.warnings.push(format!(
                    "Primary symbol {primary} unavailable; using proxy {proxy} adjusted by correlation {correlation}"
                ));
                #[cfg(feature = "tracing")]
                tracing::info!(proxy = %proxy, correlation, "resolved via proxy");
                return Ok(self.finish(run, &canonical, series, SourceKind::Proxy, proxy, None));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(symbol = %canonical, "no real data available; synthesizing");
        let (series, origin) = self.synthesize(&mut run).await;
        let source = run.profile.canonical_id.clone();
        Ok(self.finish(
            run,
            &canonical,
            series,
            SourceKind::Synthetic,
            source,
            Some(origin),
        ))
    }

    /// Run the ladder for one candidate and log the attempt.
    pub(crate) async fn try_candidate(
        &self,
        run: &mut Resolution,
        stage: Stage,
        symbol: &str,
    ) -> Option<LadderHit> {
        let max_hours = run.max_hours;
        self.try_candidate_window(run, stage, symbol, max_hours)
            .await
    }

    pub(crate) async fn try_candidate_window(
        &self,
        run: &mut Resolution,
        stage: Stage,
        symbol: &str,
        max_hours: u32,
    ) -> Option<LadderHit> {
        if deadline_elapsed(run.deadline) {
            run.attempts.push(
                stage,
                symbol,
                Outcome::Skipped {
                    reason: "request deadline elapsed".to_string(),
                },
            );
            return None;
        }
        match self.resolve_symbol(symbol, max_hours, run.deadline).await {
            Ok(hit) => {
                run.attempts.push(
                    stage,
                    symbol,
                    Outcome::Succeeded {
                        points: hit.points.len(),
                        rung: hit.rung.clone(),
                        connector: hit.connector.to_string(),
                    },
                );
                Some(hit)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(stage = %stage, symbol = %symbol, error = %e, "candidate failed");
                run.attempts.push(
                    stage,
                    symbol,
                    Outcome::Failed {
                        reason: failure_reason(&e),
                    },
                );
                None
            }
        }
    }

    fn finish(
        &self,
        run: Resolution,
        requested: &str,
        series: Vec<OhlcvPoint>,
        source_kind: SourceKind,
        source_symbol: String,
        synthetic: Option<SyntheticOrigin>,
    ) -> ResolutionResult {
        ResolutionResult {
            requested_symbol: requested.to_string(),
            display_name: run.profile.display_name,
            series,
            source_kind,
            source_symbol,
            warnings: run.warnings,
            attempts: run.attempts,
            synthetic,
            timezone: self.cfg.reference_tz,
            resolved_at: self.clock.now(),
        }
    }
}

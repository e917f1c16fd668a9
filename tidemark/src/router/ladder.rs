use tidemark_core::{OhlcvPoint, TidemarkError, normalize};
use tokio::time::Instant;

use crate::Tidemark;
use crate::core::{deadline_elapsed, tag_err};
use crate::router::util::collapse_errors;

/// Series accepted by one rung of the fetch ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderHit {
    /// Normalized, close-valid points (oldest first).
    pub points: Vec<OhlcvPoint>,
    /// Description of the rung that was accepted.
    pub rung: String,
    /// Connector that served the rung.
    pub connector: &'static str,
}

impl Tidemark {
    /// Walk the fetch ladder for a single concrete symbol.
    ///
    /// Behavior:
    /// - Rungs are tried top-to-bottom; each rung is tried against every connector
    ///   exposing `BarsProvider`, in registration order.
    /// - Each call is bounded by `provider_timeout`, clipped to what is left of `deadline`.
    /// - A rung is accepted when the normalized series has at least `min_points` points
    ///   (and is never accepted empty).
    /// - Provider errors, timeouts and thin results fall through to the next attempt.
    ///
    /// # Errors
    /// - `Unsupported` when no connector exposes bars.
    /// - `RequestTimeout` once `deadline` has elapsed.
    /// - Otherwise the collapsed provider failures (`AllProvidersTimedOut`, `NotFound`
    ///   or `AllProvidersFailed`).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark::ladder::resolve_symbol",
            skip_all,
            fields(symbol = %symbol, max_hours = max_hours),
        )
    )]
    pub async fn resolve_symbol(
        &self,
        symbol: &str,
        max_hours: u32,
        deadline: Option<Instant>,
    ) -> Result<LadderHit, TidemarkError> {
        let tz = self.cfg.reference_tz;
        let mut attempted_any = false;
        let mut errors: Vec<TidemarkError> = Vec::new();

        for rung in &self.cfg.ladder {
            for connector in &self.connectors {
                let Some(provider) = connector.as_bars_provider() else {
                    continue;
                };
                if deadline_elapsed(deadline) {
                    return Err(TidemarkError::request_timeout("bars"));
                }
                attempted_any = true;
                let name = connector.name();
                let fut = provider.fetch_bars(symbol, rung.period, rung.interval);
                let raw = match Self::provider_call_with_timeout(
                    name,
                    "bars",
                    self.call_timeout(deadline),
                    fut,
                )
                .await
                {
                    Ok(raw) => raw,
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(connector = name, rung = %rung.description, error = %e, "rung failed");
                        errors.push(tag_err(name, e));
                        continue;
                    }
                };

                let now = self.clock.now();
                let points = normalize(
                    &raw,
                    rung.window_hours(max_hours),
                    rung.is_daily,
                    tz,
                    now,
                    &self.cfg.window,
                );
                let need = rung.min_points.max(1);
                if points.len() >= need {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        connector = name,
                        rung = %rung.description,
                        points = points.len(),
                        "rung accepted"
                    );
                    return Ok(LadderHit {
                        points,
                        rung: rung.description.clone(),
                        connector: name,
                    });
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    connector = name,
                    rung = %rung.description,
                    have = points.len(),
                    need,
                    "rung below threshold"
                );
                errors.push(TidemarkError::InsufficientData {
                    have: points.len(),
                    need,
                });
            }
        }

        Err(collapse_errors(
            "bars",
            attempted_any,
            errors,
            Some(format!("bars for {symbol}")),
        ))
    }
}

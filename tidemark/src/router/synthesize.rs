use std::collections::HashSet;

use tidemark_core::{
    OhlcvPoint, Outcome, Stage, SyntheticOrigin, correlated_walk, random_walk,
};

use crate::Tidemark;
use crate::router::resolve::Resolution;

const SYNTHETIC_SOURCE: &str = "synthetic";

impl Tidemark {
    /// Terminal stage: build a synthetic series for the profile.
    ///
    /// Tries the configured benchmarks (skipping symbols this resolution already
    /// tried) and walks along the first one that resolves; otherwise falls back to
    /// a standalone hourly random walk ending at "now". Never fails.
    pub(crate) async fn synthesize(&self, run: &mut Resolution) -> (Vec<OhlcvPoint>, SyntheticOrigin) {
        let tried: HashSet<String> = run.attempts.iter().map(|e| e.symbol.clone()).collect();
        let window = self.cfg.synthetic.reference_window_hours;
        let mut reference: Option<(String, Vec<OhlcvPoint>)> = None;

        for bench in &self.cfg.synthetic.reference_symbols {
            if tried.contains(bench) {
                run.attempts.push(
                    Stage::Reference,
                    bench.as_str(),
                    Outcome::Skipped {
                        reason: "already tried in this resolution".to_string(),
                    },
                );
                continue;
            }
            if let Some(hit) = self
                .try_candidate_window(run, Stage::Reference, bench, window)
                .await
            {
                reference = Some((bench.clone(), hit.points));
                break;
            }
        }

        let mut rng = self.rng_for(&run.profile.canonical_id);
        let symbol = run.profile.canonical_id.clone();

        if let Some((bench, points)) = reference {
            let series = correlated_walk(&points, &run.profile, &self.cfg.synthetic, &mut rng);
            if !series.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::info!(reference = %bench, points = series.len(), "correlated synthetic walk");
                run.attempts.push(
                    Stage::Synthetic,
                    symbol.as_str(),
                    Outcome::Succeeded {
                        points: series.len(),
                        rung: format!("correlated walk on {bench}"),
                        connector: SYNTHETIC_SOURCE.to_string(),
                    },
                );
                run.warnings.push(format!(
                    "No real data available for {symbol}; returning synthetic series correlated with {bench}"
                ));
                return (series, SyntheticOrigin::Correlated { reference: bench });
            }
        }

        let series = random_walk(
            &run.profile,
            &self.cfg.synthetic,
            self.clock.now(),
            self.cfg.reference_tz,
            &mut rng,
        );
        #[cfg(feature = "tracing")]
        tracing::info!(points = series.len(), "standalone synthetic walk");
        run.attempts.push(
            Stage::Synthetic,
            symbol.as_str(),
            Outcome::Succeeded {
                points: series.len(),
                rung: "hourly random walk".to_string(),
                connector: SYNTHETIC_SOURCE.to_string(),
            },
        );
        run.warnings.push(format!(
            "No real data available for {symbol}; returning synthetic random walk"
        ));
        (series, SyntheticOrigin::RandomWalk)
    }
}

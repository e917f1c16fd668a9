use std::sync::Arc;

use chrono::Duration;

use crate::helpers::{
    DJI, GSPC, IXIC, UNKNOWN, anchor, builder_with, dynamic, fixture_tidemark, flat_bars,
};
use tidemark::{Outcome, SourceKind, Stage, SymbolCatalog, SymbolProfile, SyntheticOrigin};
use tidemark_mock::{MockBehavior, MockConnector};

#[tokio::test]
async fn unknown_symbol_without_reference_walks_hourly() {
    let (conn, _ctl) = dynamic("dyn");
    let tm = builder_with(conn).build().unwrap();

    let res = tm.resolve(UNKNOWN, 24).await.unwrap();

    assert_eq!(res.source_kind, SourceKind::Synthetic);
    assert_eq!(res.synthetic, Some(SyntheticOrigin::RandomWalk));
    assert_eq!(res.source_symbol, UNKNOWN);
    assert_eq!(res.display_name, UNKNOWN);
    assert_eq!(res.len(), 24);
    assert!(!res.warnings.is_empty());

    let first = &res.series[0];
    assert_eq!(first.open, Some(1000.0));
    assert_eq!(res.series.last().map(|p| p.ts), Some(anchor()));
    assert!(
        res.series
            .windows(2)
            .all(|w| w[1].ts - w[0].ts == Duration::hours(1))
    );
    assert!(res.series.iter().all(|p| p.close.is_some()));

    let refs: Vec<&str> = res.attempts.symbols_for(Stage::Reference).collect();
    assert_eq!(refs, vec![GSPC, DJI, IXIC]);
    let last = res.attempts.entries().last().unwrap();
    assert_eq!(last.stage, Stage::Synthetic);
    assert!(last.outcome.is_success());
}

#[tokio::test]
async fn unknown_symbol_follows_first_reachable_benchmark() {
    let tm = fixture_tidemark();
    let res = tm.resolve(UNKNOWN, 24).await.unwrap();

    assert_eq!(res.source_kind, SourceKind::Synthetic);
    assert_eq!(
        res.synthetic,
        Some(SyntheticOrigin::Correlated {
            reference: GSPC.to_string()
        })
    );
    // Timestamps are copied from the 15-point reference.
    assert_eq!(res.len(), 15);
    assert_eq!(res.series[0].close, Some(1000.0));
    assert!(res.warnings[0].contains(GSPC));
}

#[tokio::test]
async fn benchmark_already_tried_is_skipped() {
    let catalog = SymbolCatalog::from_profiles([
        SymbolProfile::new("^TINY", "Tiny Index").with_proxies([GSPC], 0.8)
    ])
    .unwrap();
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior(DJI, MockBehavior::Return(flat_bars(15, 40_000.0)))
        .await;
    let tm = builder_with(conn).catalog(Arc::new(catalog)).build().unwrap();

    let res = tm.resolve("^TINY", 24).await.unwrap();
    assert_eq!(
        res.synthetic,
        Some(SyntheticOrigin::Correlated {
            reference: DJI.to_string()
        })
    );

    let gspc_ref = res
        .attempts
        .iter()
        .find(|e| e.stage == Stage::Reference && e.symbol == GSPC)
        .unwrap();
    assert!(matches!(gspc_ref.outcome, Outcome::Skipped { .. }));

    // ^GSPC was fetched only during the proxy stage.
    let calls = ctl.requested_symbols().await;
    let gspc_calls = calls.iter().filter(|s| *s == GSPC).count();
    assert_eq!(gspc_calls, tidemark::default_ladder().len());
}

#[tokio::test]
async fn seeded_generator_is_reproducible() {
    let (a_conn, _a) = dynamic("a");
    let (b_conn, _b) = dynamic("b");
    let a = builder_with(a_conn).rng_seed(9).build().unwrap();
    let b = builder_with(b_conn).rng_seed(9).build().unwrap();

    let ra = a.resolve(UNKNOWN, 24).await.unwrap();
    let rb = b.resolve(UNKNOWN, 24).await.unwrap();
    assert_eq!(ra.series, rb.series);

    let (c_conn, _c) = dynamic("c");
    let c = builder_with(c_conn).rng_seed(10).build().unwrap();
    let rc = c.resolve(UNKNOWN, 24).await.unwrap();
    assert_ne!(ra.series, rc.series);
}

#[tokio::test]
async fn catalog_base_price_seeds_the_walk() {
    let (conn, _ctl) = dynamic("dyn");
    let tm = builder_with(conn).build().unwrap();
    let res = tm.resolve("^N225", 24).await.unwrap();
    assert_eq!(res.synthetic, Some(SyntheticOrigin::RandomWalk));
    assert_eq!(res.series[0].open, Some(33_000.0));
}

#[tokio::test]
async fn synthetic_series_never_counts_as_real() {
    let tm = builder_with(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let res = tm.resolve("FAIL", 24).await.unwrap();
    assert!(!res.is_real());
    match &res.attempts.entries()[0].outcome {
        Outcome::Failed { reason } => assert!(reason.contains("forced failure"), "{reason}"),
        other => panic!("unexpected: {other:?}"),
    }
}

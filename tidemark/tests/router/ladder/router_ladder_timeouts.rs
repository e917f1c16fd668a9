use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{GSPC, builder_with, dynamic, flat_bars};
use tidemark::{Outcome, SamplingInterval, SourceKind, TidemarkError};
use tidemark_mock::{MockBehavior, MockConnector};

#[tokio::test(start_paused = true)]
async fn hung_rung_times_out_and_falls_through() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior_for(GSPC, SamplingInterval::I1m, MockBehavior::Hang)
        .await;
    ctl.set_bars_behavior_for(
        GSPC,
        SamplingInterval::I5m,
        MockBehavior::Return(flat_bars(7, 1.0)),
    )
    .await;
    let tm = builder_with(conn)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let hit = tm.resolve_symbol(GSPC, 24, None).await.unwrap();
    assert_eq!(hit.rung, "5d period, 5m interval");
}

#[tokio::test(start_paused = true)]
async fn all_rungs_timing_out_collapse() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior(GSPC, MockBehavior::Hang).await;
    let tm = builder_with(conn)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = tm.resolve_symbol(GSPC, 24, None).await.unwrap_err();
    assert_eq!(
        err,
        TidemarkError::AllProvidersTimedOut {
            capability: "bars".into()
        }
    );
}

#[tokio::test]
async fn slow_fixture_symbol_degrades_instead_of_failing() {
    let tm = builder_with(Arc::new(MockConnector::new()))
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let res = tm.resolve("TIMEOUT", 24).await.unwrap();
    assert_eq!(res.source_kind, SourceKind::Synthetic);
    match &res.attempts.entries()[0].outcome {
        Outcome::Failed { reason } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("unexpected: {other:?}"),
    }
}

use std::sync::Arc;

use crate::helpers::{GSPC, builder_with, dynamic, flat_bars};
use tidemark::{SamplingInterval, Tidemark, TidemarkConnector, TidemarkError};
use tidemark_mock::MockBehavior;

struct NoBars;

impl TidemarkConnector for NoBars {
    fn name(&self) -> &'static str {
        "no-bars"
    }
}

#[tokio::test]
async fn second_connector_serves_when_first_fails() {
    let (first, first_ctl) = dynamic("first");
    let (second, second_ctl) = dynamic("second");
    first_ctl
        .set_bars_behavior(
            GSPC,
            MockBehavior::Fail(TidemarkError::connector("first", "boom")),
        )
        .await;
    second_ctl
        .set_bars_behavior(GSPC, MockBehavior::Return(flat_bars(12, 3.0)))
        .await;
    let tm = builder_with(first).with_connector(second).build().unwrap();

    let hit = tm.resolve_symbol(GSPC, 24, None).await.unwrap();
    assert_eq!(hit.connector, "second");
    assert_eq!(hit.rung, "2d period, 1m interval");
    assert_eq!(first_ctl.calls().await.len(), 1);
    assert_eq!(second_ctl.calls().await.len(), 1);
}

#[tokio::test]
async fn finer_rung_on_lower_priority_beats_coarser_rung() {
    let (first, first_ctl) = dynamic("first");
    let (second, second_ctl) = dynamic("second");
    first_ctl
        .set_bars_behavior_for(
            GSPC,
            SamplingInterval::I5m,
            MockBehavior::Return(flat_bars(8, 1.0)),
        )
        .await;
    second_ctl
        .set_bars_behavior_for(
            GSPC,
            SamplingInterval::I1m,
            MockBehavior::Return(flat_bars(15, 2.0)),
        )
        .await;
    let tm = builder_with(first).with_connector(second).build().unwrap();

    let hit = tm.resolve_symbol(GSPC, 24, None).await.unwrap();
    assert_eq!(hit.connector, "second");
    assert_eq!(hit.points.len(), 15);
}

#[tokio::test]
async fn connectors_without_bars_are_unsupported() {
    let tm = Tidemark::builder()
        .with_connector(Arc::new(NoBars))
        .build()
        .unwrap();
    let err = tm.resolve_symbol(GSPC, 24, None).await.unwrap_err();
    assert_eq!(err, TidemarkError::unsupported("bars"));

    // Resolution still completes with a synthetic series.
    let res = tm.resolve(GSPC, 24).await.unwrap();
    assert!(!res.is_real());
}

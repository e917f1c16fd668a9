use crate::helpers::{GSPC, builder_with, dynamic, flat_bars};
use tidemark::{Period, SamplingInterval, TidemarkError};
use tidemark_mock::{MockBehavior, MockCall};

fn call(period: Period, interval: SamplingInterval) -> MockCall {
    MockCall {
        symbol: GSPC.to_string(),
        period,
        interval,
    }
}

#[tokio::test]
async fn thin_minute_bars_fall_through_to_five_minute_rung() {
    let (conn, ctl) = dynamic("dyn");
    // Ten points is one short of the first rung's threshold.
    ctl.set_bars_behavior_for(
        GSPC,
        SamplingInterval::I1m,
        MockBehavior::Return(flat_bars(10, 1.0)),
    )
    .await;
    ctl.set_bars_behavior_for(
        GSPC,
        SamplingInterval::I5m,
        MockBehavior::Return(flat_bars(6, 2.0)),
    )
    .await;
    let tm = builder_with(conn).build().unwrap();

    let hit = tm.resolve_symbol(GSPC, 24, None).await.unwrap();
    assert_eq!(hit.rung, "5d period, 5m interval");
    assert_eq!(hit.connector, "dyn");
    assert_eq!(hit.points.len(), 6);

    assert_eq!(
        ctl.calls().await,
        vec![
            call(Period::D2, SamplingInterval::I1m),
            call(Period::D5, SamplingInterval::I5m),
        ]
    );
}

#[tokio::test]
async fn eleven_minute_bars_accept_first_rung() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior(GSPC, MockBehavior::Return(flat_bars(11, 1.0)))
        .await;
    let tm = builder_with(conn).build().unwrap();

    let hit = tm.resolve_symbol(GSPC, 24, None).await.unwrap();
    assert_eq!(hit.rung, "2d period, 1m interval");
    assert_eq!(ctl.calls().await.len(), 1);
}

#[tokio::test]
async fn ladder_walks_every_rung_in_order() {
    let (conn, ctl) = dynamic("dyn");
    let tm = builder_with(conn).build().unwrap();

    let err = tm.resolve_symbol(GSPC, 24, None).await.unwrap_err();
    assert_eq!(err, TidemarkError::not_found("bars for ^GSPC"));
    assert_eq!(
        ctl.calls().await,
        vec![
            call(Period::D2, SamplingInterval::I1m),
            call(Period::D5, SamplingInterval::I5m),
            call(Period::M1, SamplingInterval::I1h),
            call(Period::D5, SamplingInterval::D1),
        ]
    );
}

#[tokio::test]
async fn stale_rows_widen_to_raw_tail() {
    let (conn, ctl) = dynamic("dyn");
    let mut stale = flat_bars(3, 7.0);
    for row in &mut stale.rows {
        row.ts -= chrono::Duration::days(60);
    }
    ctl.set_bars_behavior(GSPC, MockBehavior::Return(stale)).await;
    let tm = builder_with(conn).build().unwrap();

    // Nothing is recent, so each rung falls back to the raw tail; the first rung
    // that accepts three points is the hourly one.
    let hit = tm.resolve_symbol(GSPC, 24, None).await.unwrap();
    assert_eq!(hit.rung, "1mo period, 1h interval");
    assert_eq!(hit.points.len(), 3);
}

#[tokio::test]
async fn mixed_failures_are_aggregated() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior_for(
        GSPC,
        SamplingInterval::I1m,
        MockBehavior::Fail(TidemarkError::connector("dyn", "rate limited")),
    )
    .await;
    let tm = builder_with(conn).build().unwrap();

    match tm.resolve_symbol(GSPC, 24, None).await.unwrap_err() {
        TidemarkError::AllProvidersFailed(errs) => {
            assert_eq!(errs.len(), 4);
            assert_eq!(errs[0], TidemarkError::connector("dyn", "rate limited"));
            assert!(matches!(errs[1], TidemarkError::NotFound { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

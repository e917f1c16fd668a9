use crate::helpers::{AXJO, AXKO, bar, builder_with, dynamic, fixture_tidemark, utc_bars};
use tidemark::{Outcome, SourceKind, Stage};
use tidemark_mock::MockBehavior;

#[tokio::test]
async fn proxy_move_is_damped_by_correlation() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior(AXJO, MockBehavior::Return(utc_bars(vec![bar(30, 100.0, 102.0)])))
        .await;
    let tm = builder_with(conn).build().unwrap();

    let res = tm.resolve(AXKO, 24).await.unwrap();

    assert_eq!(res.source_kind, SourceKind::Proxy);
    assert_eq!(res.source_symbol, AXJO);
    assert_eq!(res.requested_symbol, AXKO);
    assert_eq!(res.len(), 1);
    let p = &res.series[0];
    assert_eq!(p.open, Some(100.0));
    assert!((p.close.unwrap() - 101.9).abs() < 1e-9);
    // band = 0.5 * 0.019
    assert!((p.high.unwrap() - 101.9 * 1.0095).abs() < 1e-9);
    assert!((p.low.unwrap() - 100.0 * 0.9905).abs() < 1e-9);
    assert_eq!(p.volume, 1_000);

    assert_eq!(res.warnings.len(), 1);
    assert!(res.warnings[0].contains(AXJO));
    assert!(res.warnings[0].contains("0.95"));

    let stages: Vec<(Stage, &str)> = res
        .attempts
        .iter()
        .map(|e| (e.stage, e.symbol.as_str()))
        .collect();
    assert_eq!(
        stages,
        vec![
            (Stage::Primary, AXKO),
            (Stage::Alias, "XKO.AX"),
            (Stage::Proxy, AXJO),
        ]
    );
    match &res.attempts.entries()[2].outcome {
        Outcome::Succeeded { rung, points, .. } => {
            assert_eq!(rung, "1mo period, 1h interval");
            assert_eq!(*points, 1);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn fixture_connector_serves_proxy_for_asx300() {
    let tm = fixture_tidemark();
    let res = tm.resolve(AXKO, 24).await.unwrap();
    assert_eq!(res.source_kind, SourceKind::Proxy);
    assert_eq!(res.display_name, "ASX 300 (Australia)");
    assert_eq!(res.len(), 15);
    assert!(matches!(
        res.attempts.entries()[0].outcome,
        Outcome::Failed { .. }
    ));
}

#[tokio::test]
async fn first_reachable_proxy_wins() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior("^AXJO", MockBehavior::Return(utc_bars(vec![bar(5, 10.0, 11.0)])))
        .await;
    let tm = builder_with(conn).build().unwrap();

    // ^AXSO lists ^AORD before ^AXJO.
    let res = tm.resolve("^AXSO", 24).await.unwrap();
    assert_eq!(res.source_symbol, "^AXJO");
    let proxies: Vec<&str> = res.attempts.symbols_for(Stage::Proxy).collect();
    assert_eq!(proxies, vec!["^AORD", "^AXJO"]);
    assert!(res.warnings[0].contains("0.75"));
}

#[tokio::test]
async fn proxy_warning_names_exact_coefficient() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior(AXJO, MockBehavior::Return(utc_bars(vec![bar(30, 100.0, 102.0)])))
        .await;
    let catalog = tidemark::SymbolCatalog::from_profiles([
        tidemark::SymbolProfile::new(AXJO, "ASX 200 (Australia)"),
        tidemark::SymbolProfile::new(AXKO, "ASX 300 (Australia)").with_proxies([AXJO], 0.955),
    ])
    .unwrap();
    let tm = builder_with(conn).catalog(catalog).build().unwrap();

    let res = tm.resolve(AXKO, 24).await.unwrap();

    assert_eq!(res.source_kind, SourceKind::Proxy);
    assert!(
        res.warnings[0].ends_with("adjusted by correlation 0.955"),
        "{}",
        res.warnings[0]
    );
}

use std::sync::Arc;

use crate::helpers::{builder_with, dynamic, flat_bars};
use tidemark::{SourceKind, Stage, SymbolCatalog, SymbolProfile};
use tidemark_mock::MockBehavior;

fn catalog() -> SymbolCatalog {
    SymbolCatalog::from_profiles([SymbolProfile::new("^XYZ", "Example Index")
        .with_aliases(["XYZ.AX", "XYZ.L"])
        .with_proxies(["^BIG"], 0.9)])
    .unwrap()
}

#[tokio::test]
async fn alias_served_verbatim_with_warning() {
    let (conn, ctl) = dynamic("dyn");
    ctl.set_bars_behavior("XYZ.L", MockBehavior::Return(flat_bars(20, 50.0)))
        .await;
    ctl.set_bars_behavior("^BIG", MockBehavior::Return(flat_bars(20, 9.0)))
        .await;
    let tm = builder_with(conn).catalog(Arc::new(catalog())).build().unwrap();

    let res = tm.resolve("^XYZ", 24).await.unwrap();
    assert_eq!(res.source_kind, SourceKind::Alias);
    assert_eq!(res.source_symbol, "XYZ.L");
    assert_eq!(res.len(), 20);
    assert!(res.series.iter().all(|p| p.close == Some(50.0)));
    assert_eq!(
        res.warnings,
        vec!["Primary symbol ^XYZ unavailable; using alias XYZ.L".to_string()]
    );

    let aliases: Vec<&str> = res.attempts.symbols_for(Stage::Alias).collect();
    assert_eq!(aliases, vec!["XYZ.AX", "XYZ.L"]);
    assert_eq!(res.attempts.symbols_for(Stage::Proxy).count(), 0);
}

#[tokio::test]
async fn canonical_alias_is_not_retried() {
    let (conn, ctl) = dynamic("dyn");
    let tm = builder_with(conn).catalog(catalog()).build().unwrap();
    let _ = tm.resolve("^XYZ", 24).await.unwrap();

    let calls = ctl.requested_symbols().await;
    let primary_calls = calls.iter().filter(|s| *s == "^XYZ").count();
    // One call per ladder rung, never repeated in the alias stage.
    assert_eq!(primary_calls, tidemark::default_ladder().len());
}

use crate::helpers::{anchor, fixture_tidemark};
use tidemark::{ProbeStatus, SymbolCatalog, TidemarkError};

#[tokio::test]
async fn default_probe_reports_live_indices() {
    let tm = fixture_tidemark();
    let status = tm.status().await.unwrap();

    assert_eq!(status.checked_at, anchor());
    assert_eq!(status.catalog_size, SymbolCatalog::builtin().len());
    let symbols: Vec<&str> = status.entries.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["^AXJO", "^GSPC", "^DJI"]);
    assert!(status.entries.iter().all(|e| e.status == ProbeStatus::Live));
    assert!(status.entries.iter().all(|e| e.data_points == 15));
    assert!(status.any_live());
}

#[tokio::test]
async fn probe_classifies_degraded_and_synthetic() {
    let tm = fixture_tidemark();
    let status = tm.probe(&["^AXKO", "ZZZZ"]).await.unwrap();
    assert_eq!(status.entries[0].status, ProbeStatus::Degraded);
    assert_eq!(status.entries[1].status, ProbeStatus::Synthetic);
    assert!(!status.any_live());
}

#[tokio::test]
async fn probe_requires_symbols() {
    let tm = crate::helpers::builder_with(std::sync::Arc::new(tidemark_mock::MockConnector::new()))
        .probe_symbols(Vec::<String>::new())
        .build()
        .unwrap();
    assert!(matches!(tm.status().await, Err(TidemarkError::InvalidArg(_))));
}

#[tokio::test]
async fn blank_probe_symbol_is_rejected() {
    let tm = fixture_tidemark();
    let err = tm.probe(&["^GSPC", "  "]).await.unwrap_err();
    assert!(matches!(err, TidemarkError::InvalidArg(_)));
}
